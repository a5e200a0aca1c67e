use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// 0 to 100; values outside are clamped.
    pub percent: f32,
    pub label: AttrValue,
}

#[function_component(ProgressBar)]
pub fn progress_bar(p: &Props) -> Html {
    let value = p.percent.clamp(0.0, 100.0).round();
    let style = format!("width: {value}%");
    html! {
        <div
            class="progress"
            role="progressbar"
            aria-label={p.label.clone()}
            aria-valuemin="0"
            aria-valuemax="100"
            aria-valuenow={value.to_string()}
        >
            <div class="progress-fill" style={style}></div>
        </div>
    }
}
