//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::background::Background;
use crate::effect::Effect;
use crate::state::AppState;

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Search actions =====
        Action::SearchQueryChange(query) => {
            if state.is_fetching || state.query == query {
                return DispatchResult::unchanged();
            }
            state.query = query;
            DispatchResult::changed()
        }

        Action::SearchSubmit(query) => {
            if state.is_fetching {
                return DispatchResult::unchanged();
            }
            let query = query.trim().to_string();
            state.query = query.clone();
            state.is_fetching = true;
            let query = if query.is_empty() { None } else { Some(query) };
            DispatchResult::changed_with(Effect::ResolveLocation { query })
        }

        // ===== Location actions =====
        Action::LocationDidResolve(resolved) => {
            if !state.is_fetching {
                return DispatchResult::unchanged();
            }
            if resolved.inferred {
                state.query = resolved.location.name.clone();
            }
            DispatchResult::changed_with(Effect::FetchReport {
                location: resolved.location,
            })
        }

        Action::LocationDidError(msg) | Action::ReportDidError(msg) => {
            state.is_fetching = false;
            state.error = Some(msg);
            DispatchResult::changed()
        }

        // ===== Report actions =====
        Action::ReportDidLoad(report) => {
            state.is_fetching = false;
            state.background = Background::for_condition(report.weather.condition);
            state.report = Some(report);
            DispatchResult::changed()
        }

        // ===== Dialog actions =====
        Action::DialogDismiss => {
            if state.error.take().is_some() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== UI actions =====
        Action::UiFocusNext => {
            state.focus = state.focus.next();
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Quit => DispatchResult::unchanged(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{
        ConditionKind, DailyForecast, Focus, Location, Report, ResolvedLocation, WeatherSnapshot,
    };
    use chrono::NaiveDate;

    fn berlin() -> Location {
        Location {
            name: "Berlin".into(),
            lat: 52.52,
            lon: 13.405,
        }
    }

    fn report(temperature: i32, condition: ConditionKind) -> Report {
        Report {
            location: berlin(),
            timezone: "Europe/Berlin".into(),
            local_time: "09:30:00".into(),
            weather: WeatherSnapshot {
                temperature,
                condition,
                daily: vec![DailyForecast {
                    date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                    temperature: temperature - 1,
                }],
            },
        }
    }

    #[test]
    fn test_submit_empty_infers_location() {
        let mut state = AppState::default();

        let result = reducer(&mut state, Action::SearchSubmit("   ".into()));

        assert!(result.changed);
        assert!(state.is_fetching);
        assert_eq!(state.query, "");
        assert_eq!(result.effects, vec![Effect::ResolveLocation { query: None }]);
    }

    #[test]
    fn test_submit_trims_query() {
        let mut state = AppState::default();

        let result = reducer(&mut state, Action::SearchSubmit("  Paris ".into()));

        assert_eq!(state.query, "Paris");
        assert_eq!(
            result.effects,
            vec![Effect::ResolveLocation {
                query: Some("Paris".into())
            }]
        );
    }

    #[test]
    fn test_submit_ignored_while_fetching() {
        let mut state = AppState {
            is_fetching: true,
            query: "Paris".into(),
            ..Default::default()
        };

        let result = reducer(&mut state, Action::SearchSubmit("Rome".into()));

        assert!(!result.changed);
        assert!(result.effects.is_empty());
        assert_eq!(state.query, "Paris");
    }

    #[test]
    fn test_inferred_location_fills_input() {
        let mut state = AppState::default();
        reducer(&mut state, Action::SearchSubmit(String::new()));

        let result = reducer(
            &mut state,
            Action::LocationDidResolve(ResolvedLocation {
                location: berlin(),
                inferred: true,
            }),
        );

        assert_eq!(state.query, "Berlin");
        assert_eq!(
            result.effects,
            vec![Effect::FetchReport { location: berlin() }]
        );
    }

    #[test]
    fn test_typed_location_keeps_input() {
        let mut state = AppState::default();
        reducer(&mut state, Action::SearchSubmit("berlin".into()));

        reducer(
            &mut state,
            Action::LocationDidResolve(ResolvedLocation {
                location: berlin(),
                inferred: false,
            }),
        );

        assert_eq!(state.query, "berlin");
    }

    #[test]
    fn test_report_replaces_display_and_background() {
        let mut state = AppState {
            report: Some(report(-5, ConditionKind::HeavySnow)),
            background: Background::Snow,
            is_fetching: true,
            ..Default::default()
        };

        let fresh = report(18, ConditionKind::Cloudy);
        let result = reducer(&mut state, Action::ReportDidLoad(fresh.clone()));

        assert!(result.changed);
        assert!(!state.is_fetching);
        assert_eq!(state.report, Some(fresh));
        assert_eq!(state.background, Background::Cloud);
    }

    #[test]
    fn test_error_keeps_previous_report() {
        let previous = report(21, ConditionKind::Sunny);
        let mut state = AppState {
            report: Some(previous.clone()),
            is_fetching: true,
            ..Default::default()
        };

        reducer(
            &mut state,
            Action::LocationDidError("Failed to geocode city".into()),
        );

        assert!(!state.is_fetching);
        assert_eq!(state.error.as_deref(), Some("Failed to geocode city"));
        assert_eq!(state.report, Some(previous));
        assert_eq!(state.background, Background::Sun);
    }

    #[test]
    fn test_second_error_replaces_dialog() {
        let mut state = AppState::default();
        reducer(&mut state, Action::ReportDidError("first".into()));
        reducer(&mut state, Action::ReportDidError("second".into()));
        assert_eq!(state.error.as_deref(), Some("second"));
    }

    #[test]
    fn test_dismiss_dialog() {
        let mut state = AppState {
            error: Some("boom".into()),
            ..Default::default()
        };

        assert!(reducer(&mut state, Action::DialogDismiss).changed);
        assert!(state.error.is_none());
        assert!(!reducer(&mut state, Action::DialogDismiss).changed);
    }

    #[test]
    fn test_typing_ignored_while_fetching() {
        let mut state = AppState {
            is_fetching: true,
            ..Default::default()
        };
        let result = reducer(&mut state, Action::SearchQueryChange("Par".into()));
        assert!(!result.changed);
        assert_eq!(state.query, "");
    }

    #[test]
    fn test_focus_next() {
        let mut state = AppState::default();
        reducer(&mut state, Action::UiFocusNext);
        assert_eq!(state.focus, Focus::Button);
        reducer(&mut state, Action::UiFocusNext);
        assert_eq!(state.focus, Focus::Input);
    }
}
