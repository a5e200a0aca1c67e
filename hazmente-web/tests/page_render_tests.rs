use chrono::NaiveDate;
use futures::executor::block_on;
use hazmente_web::app::LoadStatus;
use hazmente_web::pages::{
    boot::{BootPage, BootPageProps},
    confirmation::{ConfirmationPage, ConfirmationPageProps},
    exercises::{ExercisesPage, ExercisesPageProps},
    not_found::{NotFound, Props as NotFoundProps},
    onboarding::{OnboardingPage, OnboardingPageProps},
};
use hazmente_web::training::{
    EngineHandle, Onboarding, Roster, SessionController, create_web_engine, load_for_level,
};
use yew::{Callback, LocalServerRenderer};

const CATALOG: &str = r#"{"exercises": [
    {"title": "Cálculo mental", "componentName": "MathExercise", "duration": 180, "minLevel": 1},
    {"title": "Tres en raya", "componentName": "TresEnRaya", "duration": 240, "minLevel": 1},
    {"title": "Globos", "componentName": "JuegoGlobos", "duration": 120, "minLevel": 1}
]}"#;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

fn session() -> SessionController {
    SessionController::new(load_for_level(CATALOG, 1).unwrap()).unwrap()
}

fn onboarding_props(wizard: Onboarding, roster_status: LoadStatus) -> OnboardingPageProps {
    OnboardingPageProps {
        wizard,
        roster_status,
        on_submit_name: Callback::noop(),
        on_submit_day: Callback::noop(),
        on_submit_month: Callback::noop(),
        on_submit_year: Callback::noop(),
        on_back: Callback::noop(),
        on_dismiss_error: Callback::noop(),
    }
}

fn exercises_props(status: LoadStatus, session: Option<SessionController>) -> ExercisesPageProps {
    ExercisesPageProps {
        status,
        level: 2,
        session,
        engine: EngineHandle::new(create_web_engine()),
        today: today(),
        seed: 7,
        show_menu: false,
        on_done: Callback::noop(),
        on_continue: Callback::noop(),
        on_replay: Callback::noop(),
        on_go_to: Callback::noop(),
        on_finish_early: Callback::noop(),
        on_restart: Callback::noop(),
        on_retry: Callback::noop(),
        on_toggle_menu: Callback::noop(),
    }
}

fn render_exercises(props: ExercisesPageProps) -> String {
    block_on(LocalServerRenderer::<ExercisesPage>::with_props(props).render())
}

#[test]
fn boot_page_renders_loading_and_redirect() {
    hazmente_web::i18n::set_lang("en");
    let html = block_on(
        LocalServerRenderer::<BootPage>::with_props(BootPageProps { ready: false }).render(),
    );
    assert!(html.contains("Loading user information"));

    let html =
        block_on(LocalServerRenderer::<BootPage>::with_props(BootPageProps { ready: true }).render());
    assert!(html.contains("Redirecting"));
}

#[test]
fn not_found_offers_a_way_back() {
    hazmente_web::i18n::set_lang("en");
    let props = NotFoundProps {
        signed_in: false,
        on_go_home: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<NotFound>::with_props(props).render());
    assert!(html.contains("Page not found"));
    assert!(html.contains("Back to start"));

    let props = NotFoundProps {
        signed_in: true,
        on_go_home: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<NotFound>::with_props(props).render());
    assert!(html.contains("Back to my exercises"));
}

#[test]
fn name_step_waits_for_the_roster() {
    hazmente_web::i18n::set_lang("en");
    let props = onboarding_props(Onboarding::new(), LoadStatus::Loading);
    let html = block_on(LocalServerRenderer::<OnboardingPage>::with_props(props).render());
    assert!(html.contains("What is your name?"));
    assert!(html.contains("Loading users"));
    assert!(html.contains("keyboard-alpha"));
    assert!(html.contains("Ñ"));
    assert!(html.contains("onboarding-next"));
    assert!(html.contains("disabled"));
}

#[test]
fn name_step_reports_a_failed_roster() {
    hazmente_web::i18n::set_lang("en");
    let props = onboarding_props(Onboarding::new(), LoadStatus::Failed("404".into()));
    let html = block_on(LocalServerRenderer::<OnboardingPage>::with_props(props).render());
    assert!(html.contains("The user list could not be loaded."));
}

#[test]
fn day_step_shows_numeric_keyboard_and_error() {
    hazmente_web::i18n::set_lang("en");
    let roster = Roster::from_json(r#"{"users":[{"name":"Maria","level":3}]}"#).unwrap();
    let mut wizard = Onboarding::new();
    wizard.submit_name("maria ", &roster).unwrap();
    assert!(wizard.submit_day("abc").is_err());

    let props = onboarding_props(wizard, LoadStatus::Ready);
    let html = block_on(LocalServerRenderer::<OnboardingPage>::with_props(props).render());
    assert!(html.contains("What day of the month is it today?"));
    assert!(html.contains("keyboard-numeric"));
    assert!(html.contains("Type the day with one or two digits."));
    assert!(html.contains("role=\"alert\""));
    assert!(html.contains("data-step=\"day\""));
}

fn draft_text(html: &str) -> &str {
    let start = html.find("class=\"draft\"").expect("draft output");
    let open = start + html[start..].find('>').unwrap() + 1;
    let close = open + html[open..].find("</output>").unwrap();
    &html[open..close]
}

fn next_button(html: &str) -> &str {
    let start = html.find("id=\"onboarding-next\"").expect("next button");
    let end = start + html[start..].find('>').unwrap();
    &html[start..end]
}

#[test]
fn each_step_starts_with_its_own_draft() {
    hazmente_web::i18n::set_lang("en");
    let roster = Roster::from_json(r#"{"users":[{"name":"Maria","level":3}]}"#).unwrap();
    let mut wizard = Onboarding::new();
    wizard.submit_name("Maria", &roster).unwrap();

    let props = onboarding_props(wizard.clone(), LoadStatus::Ready);
    let html = block_on(LocalServerRenderer::<OnboardingPage>::with_props(props).render());
    assert!(html.contains("data-step=\"day\""));
    assert!(!draft_text(&html).contains("Maria"));
    assert!(next_button(&html).contains("disabled"));

    // A wrong date sends the learner back to an empty day step.
    wizard.submit_day("1").unwrap();
    wizard.submit_month("1").unwrap();
    assert!(wizard.submit_year("1999", today()).is_err());
    let props = onboarding_props(wizard, LoadStatus::Ready);
    let html = block_on(LocalServerRenderer::<OnboardingPage>::with_props(props).render());
    assert!(html.contains("data-step=\"day\""));
    assert!(!draft_text(&html).chars().any(|c| c.is_ascii_digit()));
    assert!(next_button(&html).contains("disabled"));
}

#[test]
fn month_step_lists_every_month() {
    hazmente_web::i18n::set_lang("en");
    let roster = Roster::from_json(r#"{"users":[{"name":"Maria","level":3}]}"#).unwrap();
    let mut wizard = Onboarding::new();
    wizard.submit_name("Maria", &roster).unwrap();
    wizard.submit_day("18").unwrap();

    let props = onboarding_props(wizard, LoadStatus::Ready);
    let html = block_on(LocalServerRenderer::<OnboardingPage>::with_props(props).render());
    assert!(html.contains("What month is it?"));
    for month in ["January", "June", "December"] {
        assert!(html.contains(month), "{month} missing");
    }
}

#[test]
fn confirmation_greets_by_name_with_todays_date() {
    hazmente_web::i18n::set_lang("en");
    let props = ConfirmationPageProps {
        name: "Maria".into(),
        today: today(),
        seed: 3,
        on_start: Callback::noop(),
        on_back: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<ConfirmationPage>::with_props(props).render());
    assert!(html.contains("Maria"));
    assert!(html.contains("Sunday, October 18, 2026"));
    assert!(html.contains("start-btn"));
    assert!(html.contains("Saying of the day"));
}

#[test]
fn exercises_page_covers_load_states() {
    hazmente_web::i18n::set_lang("en");
    let html = render_exercises(exercises_props(LoadStatus::Loading, None));
    assert!(html.contains("Loading exercises"));

    let html = render_exercises(exercises_props(LoadStatus::Failed("offline".into()), None));
    assert!(html.contains("The exercises could not be loaded."));
    assert!(html.contains("retry-btn"));

    let html = render_exercises(exercises_props(LoadStatus::Empty, None));
    assert!(html.contains("There are no exercises for your level (2)."));
}

#[test]
fn exercises_page_hosts_the_current_exercise() {
    hazmente_web::i18n::set_lang("en");
    let html = render_exercises(exercises_props(LoadStatus::Ready, Some(session())));
    assert!(html.contains("Cálculo mental"));
    assert!(html.contains("data-component=\"MathExercise\""));
    assert!(html.contains("Progress: 1 of 3"));
    assert!(html.contains("exercise-done-btn"));
    assert!(html.contains("Choose exercise"));
}

#[test]
fn match_games_show_rounds() {
    hazmente_web::i18n::set_lang("en");
    let mut session = session();
    session.go_to_exercise(1).unwrap();
    session.on_exercise_complete().unwrap();
    let html = render_exercises(exercises_props(LoadStatus::Ready, Some(session)));
    assert!(html.contains("data-component=\"TresEnRaya\""));
    assert!(html.contains("Match 2 of 2"));
}

#[test]
fn exercises_page_shows_transition_and_summary() {
    hazmente_web::i18n::set_lang("en");
    let mut session = session();
    session.on_exercise_complete().unwrap();
    let html = render_exercises(exercises_props(LoadStatus::Ready, Some(session.clone())));
    assert!(html.contains("continue-btn"));
    assert!(html.contains("Cálculo mental"));

    session.finish_early();
    let html = render_exercises(exercises_props(LoadStatus::Ready, Some(session)));
    assert!(html.contains("restart-btn"));
    assert!(html.contains("You reached 33%"));
}

#[test]
fn open_menu_lists_every_exercise() {
    hazmente_web::i18n::set_lang("en");
    let mut props = exercises_props(LoadStatus::Ready, Some(session()));
    props.show_menu = true;
    let html = render_exercises(props);
    assert!(html.contains("exercise-menu-list"));
    assert!(html.contains("3. Globos"));
}
