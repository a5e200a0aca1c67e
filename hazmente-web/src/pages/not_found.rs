use crate::i18n::t;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    /// A stored learner goes back to the exercises, anyone else to onboarding.
    #[prop_or_default]
    pub signed_in: bool,
    pub on_go_home: Callback<()>,
}

#[function_component(NotFound)]
pub fn not_found(props: &Props) -> Html {
    let go_home = {
        let cb = props.on_go_home.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let back_key = if props.signed_in {
        "not_found.back_exercises"
    } else {
        "not_found.back"
    };

    html! {
        <section class="panel not-found" role="alert">
            <h1>{ t("not_found.title") }</h1>
            <p>{ t("not_found.message") }</p>
            <button type="button" id="home-btn" class="btn-primary" onclick={go_home}>
                { t(back_key) }
            </button>
        </section>
    }
}
