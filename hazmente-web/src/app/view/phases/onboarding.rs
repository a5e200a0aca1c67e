use crate::app::state::AppState;
use crate::app::view::handlers::AppHandlers;
use crate::pages::{confirmation::ConfirmationPage, onboarding::OnboardingPage};
use crate::training::OnboardingStep;
use yew::prelude::*;

pub(super) fn render_onboarding(state: &AppState, handlers: &AppHandlers) -> Html {
    let wizard = (*state.onboarding).clone();
    match wizard.step() {
        OnboardingStep::Confirmation | OnboardingStep::Complete => {
            let name = AttrValue::from(wizard.name().to_string());
            html! {
                <ConfirmationPage
                    name={name}
                    today={*state.today}
                    seed={*state.seed}
                    on_start={handlers.confirm.clone()}
                    on_back={handlers.onboarding_back.clone()}
                />
            }
        }
        OnboardingStep::Name
        | OnboardingStep::Day
        | OnboardingStep::Month
        | OnboardingStep::Year => html! {
            <OnboardingPage
                key={wizard.step().as_str()}
                wizard={wizard}
                roster_status={(*state.roster_status).clone()}
                on_submit_name={handlers.submit_name.clone()}
                on_submit_day={handlers.submit_day.clone()}
                on_submit_month={handlers.submit_month.clone()}
                on_submit_year={handlers.submit_year.clone()}
                on_back={handlers.onboarding_back.clone()}
                on_dismiss_error={handlers.dismiss_onboarding_error.clone()}
            />
        },
    }
}
