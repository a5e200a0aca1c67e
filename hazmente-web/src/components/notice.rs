use yew::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeTone {
    Info,
    Success,
    Warning,
}

impl NoticeTone {
    const fn class(self) -> &'static str {
        match self {
            Self::Info => "notice notice-info",
            Self::Success => "notice notice-success",
            Self::Warning => "notice notice-warning",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoticeMessage {
    pub tone: NoticeTone,
    pub text: AttrValue,
}

impl NoticeMessage {
    #[must_use]
    pub fn new(tone: NoticeTone, text: impl Into<AttrValue>) -> Self {
        Self {
            tone,
            text: text.into(),
        }
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub notice: NoticeMessage,
    pub on_dismiss: Callback<()>,
}

/// Dismissible banner. It never blocks the page underneath.
#[function_component(Notice)]
pub fn notice(p: &Props) -> Html {
    let dismiss = {
        let cb = p.on_dismiss.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let role = if p.notice.tone == NoticeTone::Warning {
        "alert"
    } else {
        "status"
    };
    html! {
        <div class={p.notice.tone.class()} role={role}>
            <p>{ p.notice.text.clone() }</p>
            <button
                type="button"
                class="notice-dismiss"
                aria-label={crate::i18n::t("notice.dismiss")}
                onclick={dismiss}
            >
                { "×" }
            </button>
        </div>
    }
}
