use bitflags::bitflags;
use minefield_core::{
    Action, Difficulty, Game, Layout, PointerButton, RandomPlacer, TileRect, TileView,
};
use wasm_bindgen::JsCast;
use yew::prelude::*;

/// Board side in pixels, tiles are sized to fit it.
const VIEWPORT_WIDTH: u32 = 600;

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    struct MouseButtons: u16 {
        const LEFT    = 1;
        const RIGHT   = 1 << 1;
        const MIDDLE  = 1 << 2;
    }
}

impl MouseButtons {
    /// Only a single pressed button is an action, chords of physical buttons are ignored.
    fn pointer_button(self) -> Option<PointerButton> {
        match self {
            MouseButtons::LEFT => Some(PointerButton::Primary),
            MouseButtons::RIGHT => Some(PointerButton::Secondary),
            MouseButtons::MIDDLE => Some(PointerButton::Tertiary),
            _ => None,
        }
    }
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct GameProps {
    pub seed: u64,
    pub difficulty: Difficulty,
}

pub(crate) enum Msg {
    Pointer { button: PointerButton, x: f64, y: f64 },
    Select(Difficulty),
}

#[derive(Properties, Clone, PartialEq)]
struct TileProps {
    view: TileView,
    rect: TileRect,
}

/// Tiles are placed on the board by the same rectangles pointer input is mapped against.
fn tile_style(rect: TileRect) -> String {
    format!(
        "position: absolute; left: {}px; top: {}px; width: {}px; height: {}px",
        rect.x, rect.y, rect.width, rect.height
    )
}

#[function_component(Tile)]
fn tile_component(props: &TileProps) -> Html {
    let TileProps { view, rect } = props.clone();
    let class = classes!(
        "tile",
        match view {
            TileView::Hidden => classes!(),
            TileView::Flagged => classes!("flag"),
            TileView::Mine => classes!("open", "mine"),
            TileView::Number(count) => classes!("open", format!("num-{}", count)),
        }
    );
    let style = tile_style(rect);
    let label = view.label().map(|count| count.to_string());

    html! {
        <div {class} {style}>{ for label }</div>
    }
}

pub(crate) struct GameView {
    game: Option<Game>,
    layout: Layout,
}

impl GameView {
    fn dispatch(&mut self, action: Action) -> bool {
        let Some(game) = self.game.as_mut() else {
            return false;
        };
        match game.handle(action) {
            Ok(outcome) => {
                log::debug!("{:?} -> {:?}", action, outcome);
                self.layout = Layout::for_board(VIEWPORT_WIDTH, game.board());
                outcome.has_update()
            }
            Err(err) => {
                log::error!("Could not apply {:?}: {}", action, err);
                false
            }
        }
    }

    fn view_menu(&self, ctx: &Context<Self>) -> Html {
        let current = self.game.as_ref().map(|game| game.difficulty());
        let mines_left = self
            .game
            .as_ref()
            .map_or(0, |game| game.board().mines_left())
            .to_string();
        html! {
            <nav>
                <span>{"Difficulty:"}</span>
                {
                    for Difficulty::PRESETS.iter().map(|&(label, difficulty)| {
                        let class = classes!((current == Some(difficulty)).then_some("active"));
                        let onclick = ctx.link().callback(move |_: MouseEvent| Msg::Select(difficulty));
                        html! { <button {class} {onclick}>{label}</button> }
                    })
                }
                <aside>{mines_left}</aside>
            </nav>
        }
    }

    fn view_board(&self, ctx: &Context<Self>, game: &Game) -> Html {
        let side = self.layout.board_pixels();
        let style = format!("position: relative; width: {side}px; height: {side}px");
        let onpointerdown = ctx.link().batch_callback(|e: PointerEvent| {
            e.prevent_default();
            let buttons = MouseButtons::from_bits_truncate(e.buttons());
            let button = buttons.pointer_button()?;
            let board = e.current_target()?.dyn_into::<web_sys::Element>().ok()?;
            let origin = board.get_bounding_client_rect();
            let x = f64::from(e.client_x()) - origin.left();
            let y = f64::from(e.client_y()) - origin.top();
            log::trace!("({}, {}) pointer down ({:?})", x, y, buttons);
            Some(Msg::Pointer { button, x, y })
        });
        let overlay = game.overlay().map(|overlay| {
            html! { <div class="overlay">{overlay.message()}</div> }
        });

        html! {
            <div class="board" {style} {onpointerdown}>
                {
                    for game.board().draw_list(&self.layout).map(|(coords, view, rect)| html! {
                        <Tile key={format!("{}-{}", coords.0, coords.1)} {view} {rect}/>
                    })
                }
                {overlay}
            </div>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let GameProps { seed, difficulty } = ctx.props().clone();
        let game = match Game::new(difficulty, RandomPlacer::from_seed(seed)) {
            Ok(game) => Some(game),
            Err(err) => {
                log::error!("Could not create {} game: {}", difficulty, err);
                None
            }
        };
        let layout = Layout::new(VIEWPORT_WIDTH, difficulty.config().size());
        Self { game, layout }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Pointer { button, x, y } => match self.layout.action_at(button, x, y) {
                Some(action) => self.dispatch(action),
                None => false,
            },
            Msg::Select(difficulty) => self.dispatch(Action::SelectDifficulty(difficulty)),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let board = match self.game.as_ref() {
            Some(game) => self.view_board(ctx, game),
            None => html! { <p>{"Could not start a game."}</p> },
        };

        html! {
            <div class={"minefield"} oncontextmenu={Callback::from(move |e: MouseEvent| e.prevent_default())}>
                {self.view_menu(ctx)}
                {board}
            </div>
        }
    }
}
