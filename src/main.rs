//! skycast - weather window for the terminal

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use skycast::action::Action;
use skycast::api::ApiClient;
use skycast::components::{
    Component, ErrorDialog, ErrorDialogProps, WeatherDisplay, WeatherDisplayProps, window_rect,
};
use skycast::config::Args;
use skycast::effect::Effect;
use skycast::logging;
use skycast::pipeline;
use skycast::reducer::reducer;
use skycast::state::AppState;
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{DebugRunOutput, DebugSession, DebugSessionError, ReplayItem};

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum WindowComponentId {
    Window,
    Dialog,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum WindowContext {
    Main,
    Dialog,
}

impl EventRoutingState<WindowComponentId, WindowContext> for AppState {
    fn focused(&self) -> Option<WindowComponentId> {
        if self.dialog_open() {
            Some(WindowComponentId::Dialog)
        } else {
            Some(WindowComponentId::Window)
        }
    }

    fn modal(&self) -> Option<WindowComponentId> {
        if self.dialog_open() {
            Some(WindowComponentId::Dialog)
        } else {
            None
        }
    }

    fn binding_context(&self, id: WindowComponentId) -> WindowContext {
        match id {
            WindowComponentId::Window => WindowContext::Main,
            WindowComponentId::Dialog => WindowContext::Dialog,
        }
    }

    fn default_context(&self) -> WindowContext {
        WindowContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    logging::init(args.log_file.as_deref())?;
    let client = ApiClient::new(args.endpoints()).map_err(io::Error::other)?;

    let Args {
        city,
        debug: debug_args,
        ..
    } = args;

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::with_query(city.unwrap_or_default()))
        })
        .await
        .map_err(debug_error)?;

    // Startup fetch: the pre-filled city, or the network location when empty
    let startup = Action::SearchSubmit(state.query.clone());
    tracing::info!(query = %state.query, "starting");

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, client, startup, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

struct WindowUi {
    display: WeatherDisplay,
    dialog: ErrorDialog,
}

impl WindowUi {
    fn new() -> Self {
        Self {
            display: WeatherDisplay::new(),
            dialog: ErrorDialog::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<WindowComponentId>,
    ) {
        let window = window_rect(area);
        event_ctx.set_component_area(WindowComponentId::Window, window);

        let props = WeatherDisplayProps {
            state,
            is_focused: render_ctx.is_focused() && !state.dialog_open(),
        };
        self.display.render(frame, area, props);

        match state.error.as_deref() {
            Some(message) => {
                event_ctx.set_component_area(WindowComponentId::Dialog, window);
                let props = ErrorDialogProps {
                    message,
                    is_focused: render_ctx.is_focused(),
                };
                self.dialog.render(frame, window, props);
            }
            None => {
                event_ctx
                    .component_areas
                    .remove(&WindowComponentId::Dialog);
            }
        }
    }

    fn handle_window_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = WeatherDisplayProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .display
            .handle_event(event, props)
            .into_iter()
            .collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }

    fn handle_dialog_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = ErrorDialogProps {
            message: state.error.as_deref().unwrap_or_default(),
            is_focused: true,
        };
        let actions: Vec<_> = self.dialog.handle_event(event, props).into_iter().collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    client: ApiClient,
    startup: Action,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(WindowUi::new()));
    let mut bus: EventBus<AppState, Action, WindowComponentId, WindowContext> = EventBus::new();
    let keybindings: Keybindings<WindowContext> = Keybindings::new();

    let ui_window = Rc::clone(&ui);
    bus.register(WindowComponentId::Window, move |event, state| {
        ui_window
            .borrow_mut()
            .handle_window_event(&event.kind, state)
    });

    let ui_dialog = Rc::clone(&ui);
    bus.register(WindowComponentId::Dialog, move |event, state| {
        ui_dialog
            .borrow_mut()
            .handle_dialog_event(&event.kind, state)
    });

    // Re-render on terminal resize; the window stays centred at its fixed size
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(startup),
            Some(Action::Quit),
            |_runtime| {},
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(&client, effect, ctx),
        )
        .await
}

/// Run each pipeline stage as a task; its outcome comes back as an action
fn handle_effect(client: &ApiClient, effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::ResolveLocation { query } => {
            let client = client.clone();
            ctx.tasks().spawn("location", async move {
                match pipeline::resolve_location(&client, query.as_deref()).await {
                    Ok(resolved) => Action::LocationDidResolve(resolved),
                    Err(e) => {
                        tracing::warn!(error = %e, "location lookup failed");
                        Action::LocationDidError(e.to_string())
                    }
                }
            });
        }
        Effect::FetchReport { location } => {
            let client = client.clone();
            ctx.tasks().spawn("report", async move {
                match pipeline::build_report(&client, location).await {
                    Ok(report) => Action::ReportDidLoad(report),
                    Err(e) => {
                        tracing::warn!(error = %e, "report failed");
                        Action::ReportDidError(e.to_string())
                    }
                }
            });
        }
    }
}
