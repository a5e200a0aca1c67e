use crate::i18n::t;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub titles: Vec<AttrValue>,
    /// Index on screen, if any.
    pub current: Option<usize>,
    pub open: bool,
    pub on_toggle: Callback<()>,
    pub on_select: Callback<usize>,
}

/// Out-of-order navigation over the session's exercises.
#[function_component(ExerciseMenu)]
pub fn exercise_menu(p: &Props) -> Html {
    let toggle = {
        let cb = p.on_toggle.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let toggle_label = if p.open {
        t("exercises.menu_close")
    } else {
        t("exercises.menu_open")
    };

    html! {
        <nav class="exercise-menu" aria-label={t("exercises.menu_title")}>
            <button
                type="button"
                class="btn-secondary"
                aria-expanded={p.open.to_string()}
                aria-controls="exercise-menu-list"
                onclick={toggle}
            >
                { toggle_label }
            </button>
            if p.open {
                <ol id="exercise-menu-list" class="exercise-menu-list">
                    { for p.titles.iter().enumerate().map(|(index, title)| {
                        let on_select = p.on_select.clone();
                        let active = p.current == Some(index);
                        html! {
                            <li>
                                <button
                                    type="button"
                                    class={classes!("menu-item", active.then_some("menu-item-active"))}
                                    aria-current={active.then_some("step")}
                                    onclick={Callback::from(move |_| on_select.emit(index))}
                                >
                                    { format!("{}. {title}", index + 1) }
                                </button>
                            </li>
                        }
                    }) }
                </ol>
            }
        </nav>
    }
}
