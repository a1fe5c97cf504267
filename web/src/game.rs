use clap::Args;
use cluegrid_core as game;
use gloo::timers::callback::Timeout;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use yew::prelude::*;

use crate::api::{self, ApiClient, ApiError, DEFAULT_API_BASE};
use crate::utils::js_random_seed;

/// Minimum time the loading indicator stays on screen.
const MIN_LOADING_MS: u32 = 2000;

/// Join point for the two conditions that gate Loading -> Ready: the board
/// build and the minimum-display timer run concurrently, and the transition
/// fires only once both have completed.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct PendingLoad {
    board: Option<game::Board>,
    delay_elapsed: bool,
}

impl PendingLoad {
    fn try_finish(&mut self) -> Option<game::Board> {
        if self.delay_elapsed {
            self.board.take()
        } else {
            None
        }
    }
}

/// Valid transitions:
/// - Idle -> Loading (start)
/// - Loading -> Ready (board built and minimum delay elapsed)
/// - Loading -> Failed (board build failed)
/// - Ready -> Loading (restart, wholesale re-fetch)
/// - Failed -> Loading (retry)
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Phase {
    Idle,
    Loading(PendingLoad),
    Ready(game::Board),
    Failed(String),
}

impl Phase {
    fn apply_delay_elapsed(&mut self) -> bool {
        match self {
            Phase::Loading(pending) => {
                pending.delay_elapsed = true;
                if let Some(board) = pending.try_finish() {
                    log::debug!("minimum delay elapsed last, board ready");
                    *self = Phase::Ready(board);
                }
                true
            }
            _ => false,
        }
    }

    fn apply_board_result(&mut self, result: Result<game::Board, ApiError>) -> bool {
        match result {
            Ok(board) => match self {
                Phase::Loading(pending) => {
                    pending.board = Some(board);
                    if let Some(board) = pending.try_finish() {
                        log::debug!("board arrived last, board ready");
                        *self = Phase::Ready(board);
                    }
                    true
                }
                _ => false,
            },
            Err(err) => {
                log::error!("board build failed: {}", err);
                *self = Phase::Failed(err.to_string());
                true
            }
        }
    }

    fn visibility(&self) -> Visibility {
        match self {
            Phase::Idle => Visibility {
                start: true,
                ..Default::default()
            },
            Phase::Loading(_) => Visibility {
                spinner: true,
                ..Default::default()
            },
            Phase::Ready(_) => Visibility {
                restart: true,
                board: true,
                ..Default::default()
            },
            Phase::Failed(_) => Visibility {
                start: true,
                error: true,
                ..Default::default()
            },
        }
    }
}

/// Which surfaces the current phase shows; the view renders exactly this.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct Visibility {
    start: bool,
    spinner: bool,
    board: bool,
    restart: bool,
    error: bool,
}

#[derive(Debug)]
pub(crate) enum Msg {
    Start,
    DelayElapsed(u32),
    BoardFetched(u32, Result<game::Board, ApiError>),
    CellActivated(game::Coord2),
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    col: game::Coord,
    row: game::Coord,
    question: AttrValue,
    answer: AttrValue,
    reveal: game::RevealState,
    callback: Callback<game::Coord2>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    use game::RevealState::*;

    let CellProps {
        col,
        row,
        question,
        answer,
        reveal,
        callback,
    } = props.clone();

    // Both faces are always in the tree; which one carries `shown` derives
    // from the clue's reveal state and nothing else.
    let class = classes!(
        "cell",
        match reveal {
            Hidden => classes!(),
            Question => classes!("question"),
            Answer => classes!("answer"),
        }
    );
    let question_class = classes!(
        "face",
        "question-face",
        (reveal == Question).then_some("shown")
    );
    let answer_class = classes!("face", "answer-face", (reveal == Answer).then_some("shown"));

    let onclick = Callback::from(move |_: MouseEvent| {
        callback.emit((col, row));
        log::trace!("({}, {}) clicked", col, row);
    });

    html! {
        <td {class} {onclick}>
            <span class={question_class}>{question}</span>
            <span class={answer_class}>{answer}</span>
        </td>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Override the trivia API base URL
    #[arg(short, long)]
    pub api_base: Option<String>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    phase: Phase,
    generation: u32,
    _min_delay: Option<Timeout>,
}

impl GameView {
    fn start_load(&mut self, ctx: &Context<Self>) {
        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;
        self.phase = Phase::Loading(PendingLoad::default());

        let seed = ctx.props().seed.unwrap_or_else(js_random_seed);
        log::debug!("loading board, generation {}, seed {}", generation, seed);

        let client = ApiClient::new(
            ctx.props()
                .api_base
                .clone()
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        );
        ctx.link().send_future(async move {
            let mut rng = SmallRng::seed_from_u64(seed);
            Msg::BoardFetched(generation, api::build_board(&client, &mut rng).await)
        });

        let link = ctx.link().clone();
        self._min_delay = Some(Timeout::new(MIN_LOADING_MS, move || {
            link.send_message(Msg::DelayElapsed(generation))
        }));
    }

    fn activate_cell(&mut self, coords: game::Coord2) -> bool {
        match &mut self.phase {
            Phase::Ready(board) => board
                .activate(coords)
                .map_or(false, |outcome| outcome.has_update()),
            _ => false,
        }
    }

    fn view_controls(&self, ctx: &Context<Self>, visibility: Visibility) -> Html {
        let cb_start = ctx.link().callback(|_: MouseEvent| Msg::Start);

        html! {
            <nav>
                {
                    visibility.start.then(|| html! {
                        <button class="start" onclick={cb_start.clone()}>{"Start!"}</button>
                    })
                }
                {
                    visibility.restart.then(|| html! {
                        <button class="restart" onclick={cb_start.clone()}>{"Restart!"}</button>
                    })
                }
            </nav>
        }
    }

    fn view_error(&self) -> Html {
        match &self.phase {
            Phase::Failed(message) => html! {
                <p class="error">{format!("Could not load the board: {}", message)}</p>
            },
            _ => Html::default(),
        }
    }

    fn view_board(&self, ctx: &Context<Self>) -> Html {
        let Phase::Ready(board) = &self.phase else {
            return Html::default();
        };

        html! {
            <table class="board">
                <thead>
                    <tr>
                        {
                            for board.categories().iter().map(|category| html! {
                                <th class="category">{category.title()}</th>
                            })
                        }
                    </tr>
                </thead>
                <tbody>
                    {
                        for (0..game::CLUES_PER_CATEGORY).map(|row| html! {
                            <tr>
                                {
                                    for board.categories().iter().enumerate().map(|(col, category)| {
                                        let clue = &category.clues()[row];
                                        let callback = ctx.link().callback(Msg::CellActivated);
                                        html! {
                                            <CellView
                                                col={col as game::Coord}
                                                row={row as game::Coord}
                                                question={clue.question().to_string()}
                                                answer={clue.answer().to_string()}
                                                reveal={clue.reveal_state()}
                                                {callback}
                                            />
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </tbody>
            </table>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            phase: Phase::Idle,
            generation: 0,
            _min_delay: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Start => {
                self.start_load(ctx);
                true
            }
            DelayElapsed(generation) if generation == self.generation => {
                self.phase.apply_delay_elapsed()
            }
            BoardFetched(generation, result) if generation == self.generation => {
                self.phase.apply_board_result(result)
            }
            // completions of a superseded load
            DelayElapsed(_) | BoardFetched(..) => false,
            CellActivated(coords) => self.activate_cell(coords),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let visibility = self.phase.visibility();

        html! {
            <div class="cluegrid">
                { self.view_controls(ctx, visibility) }
                { visibility.spinner.then(|| html! { <div class="loader"/> }) }
                { visibility.error.then(|| self.view_error()) }
                { visibility.board.then(|| self.view_board(ctx)) }
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_board() -> game::Board {
        let categories = (0..game::CATEGORY_COUNT)
            .map(|i| {
                let clues = (0..game::CLUES_PER_CATEGORY)
                    .map(|j| game::Clue::new(format!("q{}{}", i, j), format!("a{}{}", i, j)))
                    .collect();
                game::Category::new(format!("cat-{}", i), clues).unwrap()
            })
            .collect();
        game::Board::new(categories).unwrap()
    }

    #[test]
    fn ready_requires_both_board_and_delay() {
        let mut phase = Phase::Loading(PendingLoad::default());

        assert!(phase.apply_board_result(Ok(test_board())));
        assert!(matches!(phase, Phase::Loading(_)));

        assert!(phase.apply_delay_elapsed());
        assert!(matches!(phase, Phase::Ready(_)));
    }

    #[test]
    fn join_works_in_either_order() {
        let mut phase = Phase::Loading(PendingLoad::default());

        assert!(phase.apply_delay_elapsed());
        assert!(matches!(phase, Phase::Loading(_)));

        assert!(phase.apply_board_result(Ok(test_board())));
        assert!(matches!(phase, Phase::Ready(_)));
    }

    #[test]
    fn fetch_failure_never_leaves_the_spinner_up() {
        // There is no retry layer anywhere in the fetch path; a failure must
        // surface instead of leaving the phase stuck in Loading.
        let mut phase = Phase::Loading(PendingLoad::default());

        assert!(phase.apply_board_result(Err(ApiError::Status(500))));

        assert!(matches!(phase, Phase::Failed(_)));
        let visibility = phase.visibility();
        assert!(!visibility.spinner);
        assert!(visibility.error);
        assert!(visibility.start);
    }

    #[test]
    fn phase_walk_shows_exactly_the_expected_surfaces() {
        let idle = Phase::Idle.visibility();
        assert_eq!(
            idle,
            Visibility {
                start: true,
                ..Default::default()
            }
        );

        let loading = Phase::Loading(PendingLoad::default()).visibility();
        assert_eq!(
            loading,
            Visibility {
                spinner: true,
                ..Default::default()
            }
        );

        let ready = Phase::Ready(test_board()).visibility();
        assert_eq!(
            ready,
            Visibility {
                restart: true,
                board: true,
                ..Default::default()
            }
        );
    }

    #[test]
    fn board_activation_reports_updates_until_terminal() {
        let mut phase = Phase::Loading(PendingLoad::default());
        phase.apply_delay_elapsed();
        phase.apply_board_result(Ok(test_board()));

        let Phase::Ready(board) = &mut phase else {
            panic!("expected ready phase");
        };

        assert!(board.activate((1, 2)).unwrap().has_update());
        assert!(board.activate((1, 2)).unwrap().has_update());
        assert!(!board.activate((1, 2)).unwrap().has_update());
        assert_eq!(
            board.clue_at((1, 2)).unwrap().reveal_state(),
            game::RevealState::Answer
        );
    }

    #[test]
    fn stale_board_result_does_not_resurrect_a_ready_phase() {
        let mut phase = Phase::Ready(test_board());

        assert!(!phase.apply_board_result(Ok(test_board())));
        assert!(matches!(phase, Phase::Ready(_)));
    }
}
