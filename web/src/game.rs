use crate::theme::Theme;
use crate::utils::*;
use clap::Args;
use connections_core as game;
use gloo::timers::callback::Timeout;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// Input stays locked this long between begin and complete of a shuffle,
/// matching the tile transition duration in the stylesheet.
const SHUFFLE_DELAY_MS: u32 = 500;
const NOTICE_DURATION_MS: u32 = 3_000;
const COPIED_DURATION_MS: u32 = 2_000;

const ONE_AWAY_NOTICE: &str = "You're one away from a group!";

impl StorageKey for game::GameEngine {
    const KEY: &'static str = "connections:game:v1";
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    ToggleWord(AttrValue),
    Submit,
    Shuffle,
    FinishShuffle,
    DeselectAll,
    Reset,
    Share,
    CopyResults,
    MarkCopied,
    ClearCopied,
    ClearNotice,
    CycleTheme,
}

#[derive(Properties, Clone, PartialEq)]
struct TileProps {
    word: AttrValue,
    #[prop_or_default]
    selected: bool,
    #[prop_or_default]
    disabled: bool,
    onselect: Callback<AttrValue>,
}

#[function_component(WordTile)]
fn word_tile(props: &TileProps) -> Html {
    let TileProps {
        word,
        selected,
        disabled,
        onselect,
    } = props.clone();

    let class = classes!("tile", selected.then_some("selected"));
    let onclick = {
        let word = word.clone();
        Callback::from(move |_: MouseEvent| onselect.emit(word.clone()))
    };

    html! {
        <button {class} {onclick} {disabled}>{word}</button>
    }
}

#[derive(Properties, Clone, PartialEq)]
struct BannerProps {
    category: game::Category,
}

#[function_component(CategoryBanner)]
fn category_banner(props: &BannerProps) -> Html {
    let category = &props.category;
    let class = classes!("banner", category.color.name());

    html! {
        <div {class}>
            <h3>{category.name.clone()}</h3>
            <p>{category.words.join(", ")}</p>
        </div>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,
}

/// Owner of the live session: restores the engine from local storage on
/// mount, routes user actions into it, and writes it back after every
/// update.
pub(crate) struct GameView {
    game: game::GameEngine,
    rng: SmallRng,
    theme: Option<Theme>,
    notice: Option<&'static str>,
    copied: bool,
    shuffle_timer: Option<Timeout>,
    notice_timer: Option<Timeout>,
    copied_timer: Option<Timeout>,
}

impl GameView {
    fn fresh_game(rng: &mut SmallRng) -> game::GameEngine {
        game::GameEngine::new(game::Puzzle::builtin(), rng)
    }

    fn share_text(&self) -> String {
        game::share_text(self.game.guess_history(), self.game.puzzle().categories())
    }

    fn show_notice(&mut self, ctx: &Context<Self>, text: &'static str) {
        self.notice = Some(text);
        let link = ctx.link().clone();
        self.notice_timer = Some(Timeout::new(NOTICE_DURATION_MS, move || {
            link.send_message(Msg::ClearNotice)
        }));
    }

    fn view_notice(&self) -> Html {
        match self.notice {
            Some(text) => html! { <div class="notice">{text}</div> },
            None => Html::default(),
        }
    }

    fn view_board(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let shuffling = self.game.is_shuffling();
        let selected_count = self.game.selected_words().len();

        let cb_submit = ctx.link().callback(|_| Submit);
        let cb_shuffle = ctx.link().callback(|_| Shuffle);
        let cb_deselect = ctx.link().callback(|_| DeselectAll);
        let onselect = ctx.link().callback(Msg::ToggleWord);

        html! {
            <>
                <section class="solved">
                    { for self.game.solved_categories().map(|category| html! {
                        <CategoryBanner category={category.clone()} />
                    }) }
                </section>
                <section class="board">
                    { for self.game.remaining_words().iter().map(|word| {
                        let word = AttrValue::from(word.clone());
                        html! {
                            <WordTile
                                word={word.clone()}
                                selected={self.game.is_selected(&word)}
                                disabled={shuffling}
                                onselect={onselect.clone()}
                            />
                        }
                    }) }
                </section>
                <footer>
                    <div class="mistakes">
                        <span>{"Mistakes left:"}</span>
                        { for (0..game::MAX_MISTAKES).map(|i| html! {
                            <i class={classes!(
                                "dot",
                                (i >= self.game.mistakes_remaining()).then_some("spent"),
                            )}/>
                        }) }
                    </div>
                    <button
                        class="submit"
                        onclick={cb_submit}
                        disabled={selected_count != game::GROUP_SIZE || shuffling}
                    >
                        {"Submit"}
                    </button>
                    <button onclick={cb_shuffle} disabled={shuffling}>{"Shuffle"}</button>
                    <button onclick={cb_deselect} disabled={selected_count == 0 || shuffling}>
                        {"Deselect All"}
                    </button>
                </footer>
            </>
        }
    }

    fn view_end_screen(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let won = self.game.status().is_won();
        let heading = if won { "You won!" } else { "Game Over" };
        let message = if won {
            "You found all the connections!"
        } else {
            "You ran out of attempts. Here are all the connections:"
        };

        let cb_share = ctx.link().callback(|_| Share);
        let cb_copy = ctx.link().callback(|_| CopyResults);
        let cb_reset = ctx.link().callback(|_| Reset);

        html! {
            <section class="end">
                <h2>{heading}</h2>
                <p>{message}</p>
                <div class="share">
                    <button onclick={cb_share}>{"Share"}</button>
                    <button onclick={cb_copy}>
                        { if self.copied { "Copied" } else { "Copy Results" } }
                    </button>
                </div>
                { for self.game.puzzle().categories().iter().map(|category| html! {
                    <CategoryBanner category={category.clone()} />
                }) }
                <button class="reset" onclick={cb_reset}>{"Play Again"}</button>
            </section>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let seed = ctx.props().seed.unwrap_or_else(js_random_seed);
        let mut rng = SmallRng::seed_from_u64(seed);
        let game = game::GameEngine::local_or_else(|| Self::fresh_game(&mut rng));

        Self {
            game,
            rng,
            theme: LocalOrDefault::local_or_default(),
            notice: None,
            copied: false,
            shuffle_timer: None,
            notice_timer: None,
            copied_timer: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let updated = match msg {
            ToggleWord(word) => {
                log::trace!("toggle {}", word);
                self.game.toggle_select(&word).has_update()
            }
            Submit => {
                let outcome = self.game.submit();
                log::debug!("submit: {:?}", outcome);
                if outcome.is_one_away() {
                    self.show_notice(ctx, ONE_AWAY_NOTICE);
                }
                outcome.has_update()
            }
            Shuffle => {
                if self.game.begin_shuffle().has_update() {
                    let link = ctx.link().clone();
                    self.shuffle_timer = Some(Timeout::new(SHUFFLE_DELAY_MS, move || {
                        link.send_message(FinishShuffle)
                    }));
                    true
                } else {
                    false
                }
            }
            FinishShuffle => {
                self.shuffle_timer = None;
                self.game.complete_shuffle(&mut self.rng).has_update()
            }
            DeselectAll => self.game.deselect_all().has_update(),
            Reset => {
                log::debug!("reset");
                self.game.reset(&mut self.rng);
                self.notice = None;
                self.copied = false;
                self.notice_timer = None;
                self.copied_timer = None;
                true
            }
            Share => {
                let text = self.share_text();
                let link = ctx.link().clone();
                spawn_local(async move {
                    if share_native(&text).await {
                        return;
                    }
                    if copy_to_clipboard(&text).await {
                        link.send_message(MarkCopied);
                    }
                });
                false
            }
            CopyResults => {
                let text = self.share_text();
                let link = ctx.link().clone();
                spawn_local(async move {
                    if copy_to_clipboard(&text).await {
                        link.send_message(MarkCopied);
                    }
                });
                false
            }
            MarkCopied => {
                self.copied = true;
                let link = ctx.link().clone();
                self.copied_timer = Some(Timeout::new(COPIED_DURATION_MS, move || {
                    link.send_message(ClearCopied)
                }));
                true
            }
            ClearCopied => {
                self.copied_timer = None;
                let was_copied = self.copied;
                self.copied = false;
                was_copied
            }
            ClearNotice => {
                self.notice_timer = None;
                self.notice.take().is_some()
            }
            CycleTheme => {
                self.theme = Theme::next(self.theme);
                Theme::apply(self.theme);
                true
            }
        };

        self.game.local_save();
        updated
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let cb_theme = ctx.link().callback(|_| Msg::CycleTheme);

        html! {
            <div class="connections">
                <header>
                    <h1>{"Connections"}</h1>
                    <p>{"Create four groups of four!"}</p>
                    <button class="theme-toggle" onclick={cb_theme}>
                        {Theme::label(self.theme)}
                    </button>
                </header>
                { self.view_notice() }
                {
                    if self.game.is_finished() {
                        self.view_end_screen(ctx)
                    } else {
                        self.view_board(ctx)
                    }
                }
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_key_uses_the_versioned_namespace() {
        assert_eq!(<game::GameEngine as StorageKey>::KEY, "connections:game:v1");
    }
}
