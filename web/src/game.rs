use crate::theme::{TileStyle, tile_class};
use crate::utils::*;
use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use gloo::utils::document;
use twofold_core as game;
use wasm_bindgen::JsCast;
use web_sys::{KeyboardEvent, TouchList};
use yew::prelude::*;

/// How long the milestone banner stays up.
const CELEBRATION_MS: u32 = 3_000;

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Input(game::Command),
    TouchStart((f64, f64)),
    TouchEnd((f64, f64)),
    KeepPlaying,
    EndCelebration,
    EndHighlight,
}

fn single_touch(touches: &TouchList) -> Option<(f64, f64)> {
    if touches.length() != 1 {
        return None;
    }
    touches
        .get(0)
        .map(|touch| (f64::from(touch.client_x()), f64::from(touch.client_y())))
}

fn tile_label(value: game::Tile) -> String {
    match value {
        0 => String::new(),
        value => value.to_string(),
    }
}

#[derive(Properties, Clone, PartialEq)]
struct TileProps {
    value: game::Tile,
    #[prop_or_default]
    spawned: bool,
    #[prop_or_default]
    merged: bool,
}

#[function_component(TileView)]
fn tile_component(props: &TileProps) -> Html {
    let TileProps {
        value,
        spawned,
        merged,
    } = props.clone();

    let class = classes!(
        "tile",
        tile_class(value),
        if spawned {
            Some("tile-new")
        } else if merged && value != 0 {
            Some("tile-merged")
        } else {
            None
        }
    );
    let style = TileStyle::for_value(value).css();

    html! {
        <div {class} {style}>{tile_label(value)}</div>
    }
}

#[derive(Properties, Debug, Clone, PartialEq, Default)]
pub(crate) struct GameProps {
    /// Force a spawn seed instead of random
    #[prop_or_default]
    pub seed: Option<u64>,
}

/// What a slide did, as far as the view is concerned.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum SlideEffect {
    /// Debounced, rejected or nothing moved.
    Ignored,
    Applied,
    /// Applied, and a milestone tile showed up for the first time this game.
    Milestone(game::Tile),
}

/// Everything a game needs besides the DOM: engine, latest snapshot and the overlays.
pub(crate) struct GameSession<S = game::RandomTileSpawner> {
    pub engine: game::GridEngine<S>,
    pub state: game::GameState,
    pub milestones: game::MilestoneTracker,
    pub celebration: Option<game::Tile>,
    pub keep_playing: bool,
    /// Spawn and merge highlights are visible.
    pub highlighting: bool,
    debouncer: game::Debouncer,
    touch_start: Option<(f64, f64)>,
}

impl<S: game::TileSpawner> GameSession<S> {
    fn new(engine: game::GridEngine<S>) -> Self {
        let state = engine.game_state();
        Self {
            engine,
            state,
            milestones: game::MilestoneTracker::new(),
            celebration: None,
            keep_playing: false,
            highlighting: true,
            debouncer: game::Debouncer::default(),
            touch_start: None,
        }
    }

    fn slide(&mut self, direction: game::Direction, now_ms: u64) -> SlideEffect {
        if !self.debouncer.admit(now_ms) {
            log::trace!("slide {} debounced", direction);
            return SlideEffect::Ignored;
        }

        let outcome = self.engine.slide(direction);
        log::debug!("slide {}: {:?}", direction, outcome);
        if !outcome.is_applied() {
            return SlideEffect::Ignored;
        }

        self.state = self.engine.game_state();
        self.highlighting = true;
        match self.milestones.observe(&self.state.grid) {
            Some(milestone) => {
                self.celebration = Some(milestone);
                SlideEffect::Milestone(milestone)
            }
            None => SlideEffect::Applied,
        }
    }

    fn touch_start(&mut self, start: (f64, f64)) {
        self.touch_start = Some(start);
    }

    fn touch_end(&mut self, end: (f64, f64), now_ms: u64) -> SlideEffect {
        let swipe = self
            .touch_start
            .take()
            .and_then(|start| game::swipe_direction(start, end));
        match swipe {
            Some(direction) => self.slide(direction, now_ms),
            None => SlideEffect::Ignored,
        }
    }

    fn restart(&mut self) {
        self.engine.restart();
        self.state = self.engine.game_state();
        self.milestones.reset();
        self.celebration = None;
        self.keep_playing = false;
        self.highlighting = true;
        self.touch_start = None;
    }

    fn continue_playing(&mut self) -> bool {
        !std::mem::replace(&mut self.keep_playing, true)
    }

    fn end_celebration(&mut self) -> bool {
        self.celebration.take().is_some()
    }

    fn end_highlight(&mut self) -> bool {
        std::mem::replace(&mut self.highlighting, false)
    }

    fn show_game_over(&self) -> bool {
        self.state.game_over
    }

    fn show_win_modal(&self) -> bool {
        self.state.has_won && !self.keep_playing && !self.state.game_over
    }

    /// Banner text, hidden while the win modal covers the board.
    fn celebration_text(&self) -> Option<String> {
        self.celebration
            .filter(|_| !self.show_win_modal())
            .map(|milestone| format!("{} reached!", milestone))
    }

    fn is_spawned(&self, coords: game::Coord2) -> bool {
        self.highlighting && self.state.is_new_tile(coords)
    }

    fn is_merged(&self, value: game::Tile, now_ms: u64) -> bool {
        self.highlighting && value != 0 && self.state.is_recently_merged(value, now_ms)
    }
}

pub(crate) struct GameView {
    session: GameSession,
    _celebration_timer: Option<Timeout>,
    _highlight_timer: Option<Timeout>,
    _keydown: EventListener,
}

impl GameView {
    fn listen_keys(ctx: &Context<Self>) -> EventListener {
        let link = ctx.link().clone();
        EventListener::new_with_options(
            &document(),
            "keydown",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let code = event.code();
                if game::suppresses_scroll(&code) {
                    event.prevent_default();
                }
                if let Some(command) = game::Command::from_key_code(&code) {
                    link.send_message(Msg::Input(command));
                }
            },
        )
    }

    fn timer(ctx: &Context<Self>, millis: u32, msg: Msg) -> Timeout {
        let link = ctx.link().clone();
        Timeout::new(millis, move || link.send_message(msg))
    }

    fn highlight_timer(ctx: &Context<Self>) -> Timeout {
        let millis = u32::try_from(game::MERGE_HIGHLIGHT_MS).unwrap_or(u32::MAX);
        Self::timer(ctx, millis, Msg::EndHighlight)
    }

    fn after_slide(&mut self, ctx: &Context<Self>, effect: SlideEffect) -> bool {
        match effect {
            SlideEffect::Ignored => return false,
            SlideEffect::Milestone(_) => {
                self._celebration_timer = Some(Self::timer(ctx, CELEBRATION_MS, Msg::EndCelebration));
            }
            SlideEffect::Applied => {}
        }
        self._highlight_timer = Some(Self::highlight_timer(ctx));
        true
    }

    fn view_modal(&self, ctx: &Context<Self>) -> Html {
        let session = &self.session;
        let cb_new_game = ctx.link().callback(|_| Msg::Input(game::Command::Restart));

        if session.show_game_over() {
            html! {
                <dialog class="modal game-over" open={true}>
                    <article>
                        <h2>{"Game over!"}</h2>
                        <p>{format!("Final score: {}", game::format_score(session.state.score))}</p>
                        <footer>
                            <button onclick={cb_new_game}>{"Try again"}</button>
                        </footer>
                    </article>
                </dialog>
            }
        } else if session.show_win_modal() {
            let cb_keep_playing = ctx.link().callback(|_| Msg::KeepPlaying);
            html! {
                <dialog class="modal win" open={true}>
                    <article>
                        <h2>{"You win!"}</h2>
                        <p>{format!("Congratulations! You reached the {} tile!", game::WIN_TILE)}</p>
                        <footer>
                            <button onclick={cb_keep_playing}>{"Keep going"}</button>
                            <button onclick={cb_new_game}>{"New Game"}</button>
                        </footer>
                    </article>
                </dialog>
            }
        } else {
            html! {}
        }
    }

    fn view_direction_button(ctx: &Context<Self>, direction: game::Direction, label: &'static str) -> Html {
        let onclick = ctx
            .link()
            .callback(move |_| Msg::Input(game::Command::Slide(direction)));
        html! {
            <button class="control-button" aria-label={direction.as_str()} {onclick}>{label}</button>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let seed = ctx.props().seed.unwrap_or_else(js_random_seed);
        let session = GameSession::new(game::GridEngine::new(seed, LocalStore));
        log::debug!("new engine, seed {}, best {}", seed, session.state.best_score);

        Self {
            session,
            _celebration_timer: None,
            _highlight_timer: Some(GameView::highlight_timer(ctx)),
            _keydown: GameView::listen_keys(ctx),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let now = game::now_millis();
        match msg {
            Input(game::Command::Slide(direction)) => {
                let effect = self.session.slide(direction, now);
                self.after_slide(ctx, effect)
            }
            Input(game::Command::Restart) => {
                self.session.restart();
                self._celebration_timer = None;
                self._highlight_timer = Some(GameView::highlight_timer(ctx));
                true
            }
            TouchStart(start) => {
                self.session.touch_start(start);
                false
            }
            TouchEnd(end) => {
                let effect = self.session.touch_end(end, now);
                self.after_slide(ctx, effect)
            }
            KeepPlaying => self.session.continue_playing(),
            EndCelebration => {
                self._celebration_timer = None;
                self.session.end_celebration()
            }
            EndHighlight => {
                self._highlight_timer = None;
                self.session.end_highlight()
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use game::Direction::*;

        let session = &self.session;
        let state = &session.state;
        let now = game::now_millis();
        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::Input(game::Command::Restart)
        });
        let ontouchstart = ctx
            .link()
            .batch_callback(|e: TouchEvent| single_touch(&e.touches()).map(Msg::TouchStart));
        let ontouchend = ctx
            .link()
            .batch_callback(|e: TouchEvent| single_touch(&e.changed_touches()).map(Msg::TouchEnd));

        html! {
            <div class="twofold">
                <header>
                    <h1 class="game-title">{game::WIN_TILE.to_string()}</h1>
                    <div class="score-container">
                        <div class="score-box">
                            <span class="score-label">{"Score"}</span>
                            <span class="score-value">{game::format_score(state.score)}</span>
                        </div>
                        <div class="score-box">
                            <span class="score-label">{"Best"}</span>
                            <span class="score-value">{game::format_score(state.best_score)}</span>
                        </div>
                    </div>
                </header>
                <div class="game-info">
                    <p>{format!("Join the numbers and get to the {} tile!", game::WIN_TILE)}</p>
                    <button class="restart-button" onclick={cb_new_game}>{"New Game"}</button>
                </div>
                <div class="game-board" {ontouchstart} {ontouchend}>
                    <div class="grid-container">
                        {
                            for state.grid.iter_cells().map(|(coords, value)| html! {
                                <TileView
                                    {value}
                                    spawned={session.is_spawned(coords)}
                                    merged={session.is_merged(value, now)}
                                />
                            })
                        }
                    </div>
                </div>
                <nav class="mobile-controls">
                    <div class="control-row">{GameView::view_direction_button(ctx, Up, "↑")}</div>
                    <div class="control-row">
                        {GameView::view_direction_button(ctx, Left, "←")}
                        {GameView::view_direction_button(ctx, Down, "↓")}
                        {GameView::view_direction_button(ctx, Right, "→")}
                    </div>
                </nav>
                if let Some(text) = session.celebration_text() {
                    <aside class="celebration">{text}</aside>
                }
                {self.view_modal(ctx)}
            </div>
        }
    }
}
