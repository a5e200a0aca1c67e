use crate::i18n::{fmt_long_date, locales, t, tr};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use wasm_bindgen::JsCast;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// First name of the signed-in learner, if any.
    pub user_name: Option<AttrValue>,
    pub today: NaiveDate,
    pub current_lang: String,
    pub high_contrast: bool,
    pub on_lang_change: Callback<String>,
    pub on_toggle_hc: Callback<bool>,
    pub on_logout: Callback<()>,
}

/// "Hola, Ana. Hoy es ..." for a learner, just the date otherwise.
#[must_use]
pub fn greeting_line(user_name: Option<&str>, today: NaiveDate) -> String {
    let date = fmt_long_date(today);
    let mut vars = BTreeMap::new();
    vars.insert("date", date.as_str());
    match user_name {
        Some(name) => {
            vars.insert("name", name);
            tr("header.greeting", Some(&vars))
        }
        None => tr("header.today", Some(&vars)),
    }
}

#[function_component(Header)]
pub fn header(p: &Props) -> Html {
    let on_change = {
        let cb = p.on_lang_change.clone();
        Callback::from(move |e: web_sys::Event| {
            if let Some(sel) = e
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
            {
                cb.emit(sel.value());
            }
        })
    };
    let toggle_hc = {
        let cb = p.on_toggle_hc.clone();
        let next = !p.high_contrast;
        Callback::from(move |_| cb.emit(next))
    };
    let logout = {
        let cb = p.on_logout.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let greeting = greeting_line(p.user_name.as_deref(), p.today);

    html! {
        <header role="banner">
            <a href="#main" class="sr-only">{ t("ui.skip_to_content") }</a>
            <div class="header-content">
                <div class="header-left">
                    <span class="brand">{ t("app.title") }</span>
                    <p class="greeting">{ greeting }</p>
                </div>
                <nav aria-label={t("nav.language")} class="header-right">
                    <label for="lang-select" class="sr-only">{ t("nav.language") }</label>
                    <select id="lang-select" onchange={on_change} aria-label={t("nav.language")}>
                        { for locales().iter().map(|meta| html! {
                            <option value={meta.code} selected={meta.code == p.current_lang}>
                                { meta.name }
                            </option>
                        }) }
                    </select>
                    <button
                        type="button"
                        class="btn-secondary hc-toggle"
                        aria-pressed={p.high_contrast.to_string()}
                        onclick={toggle_hc}
                    >
                        { t("nav.high_contrast") }
                    </button>
                    if p.user_name.is_some() {
                        <button type="button" id="logout-btn" class="btn-secondary" onclick={logout}>
                            { t("nav.logout") }
                        </button>
                    }
                </nav>
            </div>
        </header>
    }
}
