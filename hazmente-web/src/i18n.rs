use chrono::{Datelike, NaiveDate};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;

const LOCALE_STORAGE_KEY: &str = "hazmente.locale";
const DEFAULT_LANG: &str = "es";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LocaleMeta {
    pub code: &'static str,
    pub name: &'static str,
}

const LOCALE_META: &[LocaleMeta] = &[
    LocaleMeta {
        code: "es",
        name: "Español",
    },
    LocaleMeta {
        code: "en",
        name: "English",
    },
];

const LOCALE_TABLE: &[(&str, &str)] = &[
    ("es", include_str!("../i18n/es.json")),
    ("en", include_str!("../i18n/en.json")),
];

pub struct I18nBundle {
    pub lang: String,
    translations: Value,
    fallback: Value,
}

fn load_translations(lang: &str) -> Option<Value> {
    let bundle = LOCALE_TABLE
        .iter()
        .find_map(|(code, data)| (*code == lang).then_some(*data))?;
    serde_json::from_str(bundle)
        .map_err(|err| log::error!("locale bundle {lang} is malformed: {err}"))
        .ok()
}

fn build_bundle(lang: &str) -> Option<I18nBundle> {
    let translations = load_translations(lang)?;
    let fallback = load_translations(DEFAULT_LANG).unwrap_or_else(|| translations.clone());
    Some(I18nBundle {
        lang: lang.to_string(),
        translations,
        fallback,
    })
}

fn empty_bundle() -> I18nBundle {
    I18nBundle {
        lang: DEFAULT_LANG.to_string(),
        translations: Value::Object(serde_json::Map::new()),
        fallback: Value::Object(serde_json::Map::new()),
    }
}

/// Supported locales with their native names.
#[must_use]
pub const fn locales() -> &'static [LocaleMeta] {
    LOCALE_META
}

fn saved_lang() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        crate::dom::local_storage()
            .ok()
            .and_then(|storage| storage.get_item(LOCALE_STORAGE_KEY).ok().flatten())
            .unwrap_or_else(|| DEFAULT_LANG.to_string())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        DEFAULT_LANG.to_string()
    }
}

thread_local! {
    static CURRENT: RefCell<I18nBundle> = RefCell::new(
        build_bundle(&saved_lang())
            .or_else(|| build_bundle(DEFAULT_LANG))
            .unwrap_or_else(empty_bundle)
    );
}

/// Switch the active language, update `<html lang>` and remember the choice.
/// Unknown codes are ignored.
pub fn set_lang(lang: &str) {
    let Some(bundle) = build_bundle(lang) else {
        log::warn!("unsupported language {lang}");
        return;
    };
    CURRENT.with(|cell| cell.replace(bundle));
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(el) = crate::dom::window()
            .and_then(|w| w.document())
            .and_then(|doc| doc.document_element())
        {
            let _ = el.set_attribute("lang", lang);
        }
        if let Ok(storage) = crate::dom::local_storage() {
            let _ = storage.set_item(LOCALE_STORAGE_KEY, lang);
        }
    }
}

#[must_use]
pub fn current_lang() -> String {
    CURRENT.with(|c| c.borrow().lang.clone())
}

fn get_nested_value<'a>(obj: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(obj, |current, k| current.get(k))
}

fn render_value(value: &Value, args: Option<&BTreeMap<&str, &str>>) -> Option<String> {
    let mut text = value.as_str()?.to_string();
    if let Some(args_map) = args {
        for (k, v) in args_map {
            let ph1 = format!("{{{{{k}}}}}"); // {{var}}
            let ph2 = format!("{{{k}}}"); // {var}
            text = text.replace(&ph1, v);
            text = text.replace(&ph2, v);
        }
    }
    Some(text)
}

fn resolve(key: &str, args: Option<&BTreeMap<&str, &str>>) -> Option<String> {
    CURRENT.with(|cell| {
        let bundle = cell.borrow();
        get_nested_value(&bundle.translations, key)
            .and_then(|v| render_value(v, args))
            .or_else(|| get_nested_value(&bundle.fallback, key).and_then(|v| render_value(v, args)))
    })
}

/// Number of entries under an object key, e.g. the greeting variants.
#[must_use]
pub fn variant_count(key: &str) -> usize {
    CURRENT.with(|cell| {
        let bundle = cell.borrow();
        get_nested_value(&bundle.translations, key)
            .or_else(|| get_nested_value(&bundle.fallback, key))
            .and_then(Value::as_object)
            .map_or(0, serde_json::Map::len)
    })
}

/// Translate a key to the current language. Missing keys come back as the
/// key itself.
#[must_use]
pub fn t(key: &str) -> String {
    tr(key, None)
}

/// Translate a key, replacing `{var}` / `{{var}}` placeholders.
#[must_use]
pub fn tr(key: &str, args: Option<&BTreeMap<&str, &str>>) -> String {
    resolve(key, args).unwrap_or_else(|| key.to_string())
}

/// Localized month name for `1..=12`.
#[must_use]
pub fn month_name(month: u32) -> String {
    t(&format!("date.months.{month}"))
}

/// Long form such as "domingo, 18 de octubre de 2026".
#[must_use]
pub fn fmt_long_date(date: NaiveDate) -> String {
    let weekday = t(&format!(
        "date.weekdays.{}",
        date.weekday().num_days_from_monday()
    ));
    let month = month_name(date.month());
    let day = date.day().to_string();
    let year = date.year().to_string();
    let mut vars = BTreeMap::new();
    vars.insert("weekday", weekday.as_str());
    vars.insert("day", day.as_str());
    vars.insert("month", month.as_str());
    vars.insert("year", year.as_str());
    tr("date.long", Some(&vars))
}
