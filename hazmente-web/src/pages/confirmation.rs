use crate::app::phase::variant_index;
use crate::i18n::{fmt_long_date, t, tr, variant_count};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use yew::prelude::*;

const GREETING_SALT: u64 = 0x6772_6565;
const PROVERB_SALT: u64 = 0x7072_6f76;

#[derive(Properties, PartialEq, Clone)]
pub struct ConfirmationPageProps {
    pub name: AttrValue,
    pub today: NaiveDate,
    pub seed: u64,
    pub on_start: Callback<()>,
    pub on_back: Callback<()>,
}

/// Greeting variant for this visit.
#[must_use]
pub fn greeting(name: &str, seed: u64) -> String {
    let index = variant_index(seed, GREETING_SALT, variant_count("confirmation.greetings"));
    let mut vars = BTreeMap::new();
    vars.insert("name", name);
    tr(&format!("confirmation.greetings.{index}"), Some(&vars))
}

#[must_use]
pub fn proverb(seed: u64) -> String {
    let index = variant_index(seed, PROVERB_SALT, variant_count("confirmation.proverbs"));
    t(&format!("confirmation.proverbs.{index}"))
}

#[function_component(ConfirmationPage)]
pub fn confirmation_page(p: &ConfirmationPageProps) -> Html {
    let on_start = {
        let cb = p.on_start.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let on_back = {
        let cb = p.on_back.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let date = fmt_long_date(p.today);
    let mut vars = BTreeMap::new();
    vars.insert("date", date.as_str());

    html! {
        <section class="panel confirmation" aria-live="polite">
            <h1>{ greeting(&p.name, p.seed) }</h1>
            <p class="today">{ tr("confirmation.today", Some(&vars)) }</p>
            <figure class="proverb">
                <figcaption>{ t("confirmation.proverb_title") }</figcaption>
                <blockquote>{ proverb(p.seed) }</blockquote>
            </figure>
            <div class="actions">
                <button type="button" class="btn-secondary" onclick={on_back}>
                    { t("onboarding.back") }
                </button>
                <button type="button" id="start-btn" class="btn-primary" onclick={on_start}>
                    { t("confirmation.start") }
                </button>
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_is_stable_for_a_seed() {
        crate::i18n::set_lang("es");
        let first = greeting("María", 42);
        assert_eq!(first, greeting("María", 42));
        assert!(first.contains("María"), "{first}");
        assert!(!proverb(42).starts_with("confirmation."));
    }
}
