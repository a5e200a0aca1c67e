//! On-screen keyboards for the onboarding steps.
//!
//! Large buttons replace the device keyboard so learners never need to
//! type. Each keyboard reports the full new value, not the key.
use crate::i18n::{month_name, t};
use yew::prelude::*;

const LETTERS: &str = "ABCDEFGHIJKLMNÑOPQRSTUVWXYZ";
const DIGITS: [char; 10] = ['1', '2', '3', '4', '5', '6', '7', '8', '9', '0'];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyPress {
    Char(char),
    Space,
    Backspace,
}

/// Value after pressing `key`. Input past `max_len` characters is ignored.
#[must_use]
pub fn apply_key(current: &str, key: KeyPress, max_len: Option<usize>) -> String {
    let mut next = current.to_string();
    match key {
        KeyPress::Backspace => {
            next.pop();
        }
        KeyPress::Char(_) | KeyPress::Space
            if max_len.is_some_and(|max| current.chars().count() >= max) => {}
        KeyPress::Char(c) => next.push(c),
        KeyPress::Space => {
            // Leading or doubled spaces only confuse the roster lookup.
            if !next.is_empty() && !next.ends_with(' ') {
                next.push(' ');
            }
        }
    }
    next
}

fn key_callback(
    value: &AttrValue,
    max_len: Option<usize>,
    on_change: &Callback<String>,
    key: KeyPress,
) -> Callback<MouseEvent> {
    let value = value.clone();
    let on_change = on_change.clone();
    Callback::from(move |_| on_change.emit(apply_key(&value, key, max_len)))
}

#[derive(Properties, PartialEq, Clone)]
pub struct AlphaProps {
    pub value: AttrValue,
    pub on_change: Callback<String>,
}

#[function_component(AlphaKeyboard)]
pub fn alpha_keyboard(p: &AlphaProps) -> Html {
    html! {
        <div class="keyboard keyboard-alpha" role="group" aria-label={t("onboarding.name.prompt")}>
            { for LETTERS.chars().map(|letter| html! {
                <button
                    type="button"
                    class="key"
                    onclick={key_callback(&p.value, None, &p.on_change, KeyPress::Char(letter))}
                >
                    { letter.to_string() }
                </button>
            }) }
            <button
                type="button"
                class="key key-wide key-space"
                onclick={key_callback(&p.value, None, &p.on_change, KeyPress::Space)}
            >
                { t("keyboard.space") }
            </button>
            <button
                type="button"
                class="key key-wide key-delete"
                aria-label={t("keyboard.backspace")}
                onclick={key_callback(&p.value, None, &p.on_change, KeyPress::Backspace)}
            >
                { "⌫" }
            </button>
        </div>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct NumericProps {
    pub value: AttrValue,
    pub max_len: usize,
    pub on_change: Callback<String>,
}

#[function_component(NumericKeyboard)]
pub fn numeric_keyboard(p: &NumericProps) -> Html {
    let max_len = Some(p.max_len);
    html! {
        <div class="keyboard keyboard-numeric" role="group">
            { for DIGITS.iter().map(|digit| html! {
                <button
                    type="button"
                    class="key"
                    onclick={key_callback(&p.value, max_len, &p.on_change, KeyPress::Char(*digit))}
                >
                    { digit.to_string() }
                </button>
            }) }
            <button
                type="button"
                class="key key-wide key-delete"
                aria-label={t("keyboard.backspace")}
                onclick={key_callback(&p.value, max_len, &p.on_change, KeyPress::Backspace)}
            >
                { "⌫" }
            </button>
        </div>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct MonthProps {
    pub selected: Option<u32>,
    pub on_select: Callback<u32>,
}

#[function_component(MonthKeyboard)]
pub fn month_keyboard(p: &MonthProps) -> Html {
    html! {
        <div class="keyboard keyboard-month" role="group" aria-label={t("onboarding.month.prompt")}>
            { for (1..=12_u32).map(|month| {
                let on_select = p.on_select.clone();
                let pressed = p.selected == Some(month);
                html! {
                    <button
                        type="button"
                        class={classes!("key", "key-month", pressed.then_some("key-selected"))}
                        data-month={month.to_string()}
                        aria-pressed={pressed.to_string()}
                        onclick={Callback::from(move |_| on_select.emit(month))}
                    >
                        { month_name(month) }
                    </button>
                }
            }) }
        </div>
    }
}
