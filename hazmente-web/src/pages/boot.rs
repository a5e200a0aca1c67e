use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct BootPageProps {
    /// Set once the stored profile has been read and the gate opened.
    pub ready: bool,
}

#[function_component(BootPage)]
pub fn boot_page(props: &BootPageProps) -> Html {
    let message = if props.ready {
        crate::i18n::t("ui.redirecting")
    } else {
        crate::i18n::t("ui.loading_user")
    };
    html! {
        <section class="panel boot" aria-busy={(!props.ready).to_string()} aria-live="polite">
            <h1>{ crate::i18n::t("app.title") }</h1>
            <p>{ message }</p>
        </section>
    }
}
