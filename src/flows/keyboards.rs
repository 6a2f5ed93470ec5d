//! Keyboards shared by the conversational flows
//!
//! Callback payloads here are the contract the callback dispatcher matches on.

use crate::i18n::I18n;
use crate::models::{Event, FaqCategory, RegistrationSummary};
use crate::services::{Button, Keyboard};
use crate::utils::helpers::truncate_text;

pub const CLOSE: &str = "close";
pub const MANAGE_PROFILE: &str = "manage_profile";
pub const MY_EVENTS: &str = "my_events";
pub const MY_EVENT_SELECT: &str = "my_event_select_";
pub const MY_EVENT_BACK: &str = "my_event_back";
pub const PROFILE_BACK: &str = "profile_back";
pub const SKIP_QUESTION: &str = "skip_question";
pub const VALIDATE: &str = "validate";
pub const TRY_AGAIN: &str = "try_again";
pub const MALE: &str = "male";
pub const FEMALE: &str = "female";
pub const YES: &str = "yes";
pub const NO: &str = "no";
pub const FIRST_DIVISION: &str = "first";
pub const SECOND_DIVISION: &str = "second";
pub const EVENT_SELECT: &str = "event_select_";
pub const EVENT_REGISTER: &str = "event_register_";
pub const EVENT_REGISTRATION_BACK: &str = "event_registration_back";
pub const FAQ_SELECT: &str = "faq_category_select_";
pub const FAQ_BACK: &str = "faq_category_back";

const BUTTON_LABEL_LIMIT: usize = 48;

fn single(button: Button) -> Keyboard {
    Keyboard::Inline(vec![vec![button]])
}

/// Persistent reply keyboard with the main menu entries
pub fn main_menu(i18n: &I18n, lang: &str) -> Keyboard {
    Keyboard::MainMenu(vec![
        vec![i18n.t("buttons.profile", lang, None), i18n.t("buttons.events", lang, None)],
        vec![i18n.t("buttons.faq", lang, None), i18n.t("buttons.help", lang, None)],
        vec![i18n.t("buttons.tumbochka", lang, None)],
    ])
}

pub fn tumbochka(i18n: &I18n, lang: &str) -> Keyboard {
    single(Button::callback(i18n.t("buttons.close", lang, None), CLOSE))
}

pub fn profile(i18n: &I18n, lang: &str) -> Keyboard {
    Keyboard::Inline(vec![
        vec![Button::callback(i18n.t("buttons.manage_profile", lang, None), MANAGE_PROFILE)],
        vec![Button::callback(i18n.t("buttons.my_events", lang, None), MY_EVENTS)],
        vec![Button::callback(i18n.t("buttons.close", lang, None), CLOSE)],
    ])
}

pub fn skip_question(i18n: &I18n, lang: &str) -> Keyboard {
    single(Button::callback(i18n.t("buttons.skip", lang, None), SKIP_QUESTION))
}

pub fn validate(i18n: &I18n, lang: &str) -> Keyboard {
    Keyboard::Inline(vec![vec![
        Button::callback(i18n.t("buttons.validate", lang, None), VALIDATE),
        Button::callback(i18n.t("buttons.try_again", lang, None), TRY_AGAIN),
    ]])
}

pub fn gender(i18n: &I18n, lang: &str) -> Keyboard {
    Keyboard::Inline(vec![
        vec![
            Button::callback(i18n.t("buttons.male", lang, None), MALE),
            Button::callback(i18n.t("buttons.female", lang, None), FEMALE),
        ],
        vec![Button::callback(i18n.t("buttons.skip", lang, None), SKIP_QUESTION)],
    ])
}

pub fn yes_no(i18n: &I18n, lang: &str) -> Keyboard {
    Keyboard::Inline(vec![vec![
        Button::callback(i18n.t("buttons.yes", lang, None), YES),
        Button::callback(i18n.t("buttons.no", lang, None), NO),
    ]])
}

pub fn yes_only(i18n: &I18n, lang: &str) -> Keyboard {
    single(Button::callback(i18n.t("buttons.yes", lang, None), YES))
}

pub fn division(i18n: &I18n, lang: &str) -> Keyboard {
    Keyboard::Inline(vec![vec![
        Button::callback(i18n.t("buttons.first_division", lang, None), FIRST_DIVISION),
        Button::callback(i18n.t("buttons.second_division", lang, None), SECOND_DIVISION),
    ]])
}

pub fn event_list(i18n: &I18n, lang: &str, events: &[Event]) -> Keyboard {
    let mut rows: Vec<Vec<Button>> = events
        .iter()
        .map(|event| {
            vec![Button::callback(
                truncate_text(&event.title, BUTTON_LABEL_LIMIT),
                format!("{}{}", EVENT_SELECT, event.id),
            )]
        })
        .collect();
    rows.push(vec![Button::callback(i18n.t("buttons.close", lang, None), CLOSE)]);
    Keyboard::Inline(rows)
}

/// Register button under an event card, with an optional way back to the list
pub fn event_card(i18n: &I18n, lang: &str, event_id: i64, with_back: bool) -> Keyboard {
    let mut rows = vec![vec![Button::callback(
        i18n.t("buttons.register", lang, None),
        format!("{}{}", EVENT_REGISTER, event_id),
    )]];
    if with_back {
        rows.push(vec![Button::callback(
            i18n.t("buttons.back", lang, None),
            format!("{}_{}", EVENT_REGISTRATION_BACK, event_id),
        )]);
    }
    Keyboard::Inline(rows)
}

pub fn my_events(i18n: &I18n, lang: &str, registrations: &[RegistrationSummary]) -> Keyboard {
    let mut rows: Vec<Vec<Button>> = registrations
        .iter()
        .map(|registration| {
            vec![Button::callback(
                format!(
                    "#{} {}",
                    registration.id,
                    truncate_text(&registration.event_title, BUTTON_LABEL_LIMIT)
                ),
                format!("{}{}", MY_EVENT_SELECT, registration.id),
            )]
        })
        .collect();
    rows.push(vec![Button::callback(i18n.t("buttons.back", lang, None), PROFILE_BACK)]);
    Keyboard::Inline(rows)
}

pub fn my_event_back(i18n: &I18n, lang: &str) -> Keyboard {
    single(Button::callback(i18n.t("buttons.back", lang, None), MY_EVENT_BACK))
}

pub fn faq(i18n: &I18n, lang: &str, categories: &[FaqCategory], with_back: bool) -> Keyboard {
    let mut rows: Vec<Vec<Button>> = categories
        .iter()
        .map(|category| {
            vec![Button::callback(
                category.label(),
                format!("{}{}", FAQ_SELECT, category.id),
            )]
        })
        .collect();
    if with_back {
        rows.push(vec![Button::callback(i18n.t("buttons.back", lang, None), FAQ_BACK)]);
    }
    Keyboard::Inline(rows)
}

pub fn invite(i18n: &I18n, lang: &str, link: &str) -> Keyboard {
    single(Button::url(i18n.t("buttons.join_chat", lang, None), link))
}
