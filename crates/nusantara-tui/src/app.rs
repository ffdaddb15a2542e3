use crate::stats::{format_time, StatsManager};
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use nusantara_core::{
    CompletionFlash, Difficulty, Game, GameStatus, Generator, HintOutcome, InputMode, PlaceOutcome,
    Position, MAX_ERRORS,
};

/// Result of handling a key press
pub enum AppAction {
    Continue,
    Quit,
}

/// Current screen state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    /// Normal gameplay
    Playing,
    /// Win celebration screen
    Win,
    /// Game over screen (too many wrong entries)
    Lose,
    /// Statistics screen
    Stats,
}

/// Menu state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    None,
    NewGame,
}

/// A transient row/column/box completion highlight.
pub struct FlashState {
    pub flash: CompletionFlash,
    pub center: Position,
    ttl: u32,
}

/// Flash lifetime in ticks (~800ms at the 100ms tick rate).
const FLASH_TICKS: u32 = 8;
/// App ticks per game-clock second.
const TICKS_PER_SECOND: u32 = 10;

/// The main application state
pub struct App {
    /// Current game
    pub game: Game,
    /// Cursor position on the board
    pub cursor: Position,
    /// Color theme
    pub theme: Theme,
    /// Current menu state
    pub menu: MenuState,
    /// Selected menu item
    pub menu_selection: usize,
    /// Message to display
    pub message: Option<String>,
    /// Message timer
    message_timer: u32,
    /// Current screen state
    pub screen_state: ScreenState,
    /// Active completion flash, if any
    pub flash: Option<FlashState>,
    /// Statistics manager
    pub stats: StatsManager,
    /// Whether the last win set a new best time
    pub new_best: bool,
    /// Whether current game has been recorded (to avoid double recording)
    game_recorded: bool,
    /// Sub-second tick accumulator for the game clock
    clock_ticks: u32,
}

impl App {
    /// Create a new app, optionally with a fixed generator seed.
    pub fn new(difficulty: Difficulty, seed: Option<u64>) -> Self {
        let game = match seed {
            Some(seed) => Game::with_generator(&mut Generator::with_seed(seed), difficulty),
            None => Game::new(difficulty),
        };
        Self {
            game,
            cursor: Position::new(4, 4),
            theme: Theme::for_difficulty(difficulty),
            menu: MenuState::None,
            menu_selection: 0,
            message: None,
            message_timer: 0,
            screen_state: ScreenState::Playing,
            flash: None,
            stats: StatsManager::load(),
            new_best: false,
            game_recorded: false,
            clock_ticks: 0,
        }
    }

    /// Update timers (called every 100ms tick)
    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }

        if let Some(flash) = &mut self.flash {
            flash.ttl -= 1;
            if flash.ttl == 0 {
                self.flash = None;
            }
        }

        if self.screen_state == ScreenState::Playing {
            self.clock_ticks += 1;
            if self.clock_ticks >= TICKS_PER_SECOND {
                self.clock_ticks = 0;
                self.game.tick();
            }
        }
    }

    /// Show a temporary message
    pub fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_timer = 30; // ~3 seconds at 100ms poll
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match self.screen_state {
            ScreenState::Win | ScreenState::Lose => self.handle_endgame_key(key),
            ScreenState::Stats => self.handle_stats_key(key),
            ScreenState::Playing => match self.menu {
                MenuState::None => self.handle_game_key(key),
                MenuState::NewGame => self.handle_menu_key(key),
            },
        }
    }

    fn handle_game_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => {
                // A session abandoned mid-play still counts as played.
                if self.game.status() == GameStatus::InProgress {
                    self.record_played();
                }
                return AppAction::Quit;
            }

            // Navigation
            KeyCode::Up => self.move_cursor(-1, 0),
            KeyCode::Down => self.move_cursor(1, 0),
            KeyCode::Left => self.move_cursor(0, -1),
            KeyCode::Right => self.move_cursor(0, 1),

            // Number input
            KeyCode::Char(c @ '1'..='9') => {
                let digit = c.to_digit(10).unwrap() as u8;
                self.place(digit);
            }

            // Clear cell (value and notes)
            KeyCode::Char('0') | KeyCode::Delete | KeyCode::Backspace => {
                self.place(0);
            }

            // Notes mode toggle
            KeyCode::Char('n') => {
                self.game.toggle_notes_mode();
                match self.game.mode() {
                    InputMode::Notes => self.show_message("Mode catatan"),
                    InputMode::Normal => self.show_message("Mode normal"),
                }
            }

            // Hint
            KeyCode::Char('h') => self.hint(),

            // Pause
            KeyCode::Char('p') | KeyCode::Esc => {
                self.game.toggle_pause();
                if self.game.is_paused() {
                    self.show_message("Jeda - papan disembunyikan");
                } else {
                    self.show_message("Lanjut");
                }
            }

            // Reset: same solution, fresh blank pattern
            KeyCode::Char('r') => {
                self.game.reset();
                self.flash = None;
                self.game_recorded = false;
                self.clock_ticks = 0;
                self.show_message("Papan diacak ulang");
            }

            // Difficulty menu
            KeyCode::Char('g') => {
                self.menu = MenuState::NewGame;
                self.menu_selection = Difficulty::all()
                    .iter()
                    .position(|&d| d == self.game.difficulty())
                    .unwrap_or(0);
            }

            // Stats screen
            KeyCode::Char('i') => {
                self.screen_state = ScreenState::Stats;
            }

            _ => {}
        }

        AppAction::Continue
    }

    fn place(&mut self, digit: u8) {
        self.game.select(self.cursor);
        match self.game.place(digit) {
            PlaceOutcome::Rejected => {
                if self.game.is_over() {
                    // Finished board stays visible but frozen.
                } else if self.game.is_paused() {
                    self.show_message("Sedang jeda");
                } else if self.game.is_fixed(self.cursor) {
                    self.show_message("Angka bawaan tidak bisa diubah");
                }
            }
            PlaceOutcome::NoteToggled | PlaceOutcome::Cleared => {}
            PlaceOutcome::Placed { correct: true } => {
                self.flash_completions();
            }
            PlaceOutcome::Placed { correct: false } => {
                let remaining = MAX_ERRORS - self.game.errors();
                self.show_message(&format!("Salah! {} kesempatan tersisa", remaining));
            }
            PlaceOutcome::Won => self.on_win(),
            PlaceOutcome::Lost => self.on_loss(),
        }
    }

    fn hint(&mut self) {
        self.game.select(self.cursor);
        match self.game.hint() {
            HintOutcome::Applied { pos, won } => {
                self.cursor = pos;
                self.flash_completions();
                if won {
                    self.on_win();
                } else {
                    self.show_message(&format!(
                        "Petunjuk dipakai, sisa {}",
                        self.game.hints_left()
                    ));
                }
            }
            HintOutcome::NoHintsLeft => self.show_message("Petunjuk habis"),
            HintOutcome::FixedCell => self.show_message("Pilih sel yang kosong"),
            HintOutcome::Paused => self.show_message("Sedang jeda"),
            HintOutcome::NoSelection | HintOutcome::Ended => {}
        }
    }

    fn flash_completions(&mut self) {
        let flash = self.game.completion_flash(self.cursor);
        if flash.any() {
            self.flash = Some(FlashState {
                flash,
                center: self.cursor,
                ttl: FLASH_TICKS,
            });
        }
    }

    fn on_win(&mut self) {
        let secs = self.game.elapsed_secs();
        self.new_best = false;
        if !self.game_recorded {
            self.game_recorded = true;
            self.new_best = self.stats.record_win(self.game.difficulty(), secs);
        }
        self.screen_state = ScreenState::Win;
    }

    fn on_loss(&mut self) {
        self.record_played();
        self.screen_state = ScreenState::Lose;
    }

    fn record_played(&mut self) {
        if !self.game_recorded {
            self.game_recorded = true;
            self.stats.record_played();
        }
    }

    fn handle_endgame_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,
            KeyCode::Char('g') => {
                self.screen_state = ScreenState::Playing;
                self.menu = MenuState::NewGame;
                self.menu_selection = Difficulty::all()
                    .iter()
                    .position(|&d| d == self.game.difficulty())
                    .unwrap_or(0);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                // Quick restart at the same tier
                self.new_game(self.game.difficulty());
            }
            KeyCode::Esc => {
                // Back to the (finished) board view
                self.screen_state = ScreenState::Playing;
            }
            KeyCode::Char('i') => {
                self.screen_state = ScreenState::Stats;
            }
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_menu_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.menu = MenuState::None;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if self.menu_selection > 0 {
                    self.menu_selection -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.menu_selection < Difficulty::all().len() - 1 {
                    self.menu_selection += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let difficulty = Difficulty::all()[self.menu_selection];
                self.new_game(difficulty);
            }
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_stats_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc | KeyCode::Char('i') => {
                self.screen_state = ScreenState::Playing;
            }
            _ => {}
        }
        AppAction::Continue
    }

    fn new_game(&mut self, difficulty: Difficulty) {
        // A session abandoned for a new board still counts as played.
        if self.game.status() == GameStatus::InProgress {
            self.record_played();
        }
        self.game = Game::new(difficulty);
        self.theme = Theme::for_difficulty(difficulty);
        self.cursor = Position::new(4, 4);
        self.menu = MenuState::None;
        self.screen_state = ScreenState::Playing;
        self.flash = None;
        self.new_best = false;
        self.game_recorded = false;
        self.clock_ticks = 0;
        let culture = difficulty.culture();
        self.show_message(&format!(
            "Petualangan baru: {} ({})",
            culture.name, culture.level
        ));
    }

    fn move_cursor(&mut self, row_delta: i32, col_delta: i32) {
        let new_row = (self.cursor.row as i32 + row_delta).clamp(0, 8) as usize;
        let new_col = (self.cursor.col as i32 + col_delta).clamp(0, 8) as usize;
        self.cursor = Position::new(new_row, new_col);
        self.game.select(self.cursor);
    }

    /// Elapsed time of the current session, formatted for display.
    pub fn timer_text(&self) -> String {
        format_time(self.game.elapsed_secs())
    }

    /// Check if a position is highlighted (same row, col, or box as cursor)
    pub fn is_highlighted(&self, pos: Position) -> bool {
        pos.row == self.cursor.row
            || pos.col == self.cursor.col
            || pos.box_index() == self.cursor.box_index()
    }

    /// Check if a position shares its digit with the cursor's cell
    pub fn has_same_value(&self, pos: Position) -> bool {
        let cursor_value = self.game.value(self.cursor);
        cursor_value != 0 && self.game.value(pos) == cursor_value
    }

    /// Whether a position lies inside the active completion flash.
    pub fn in_flash(&self, pos: Position) -> bool {
        let Some(state) = &self.flash else {
            return false;
        };
        (state.flash.row && pos.row == state.center.row)
            || (state.flash.col && pos.col == state.center.col)
            || (state.flash.block && pos.box_index() == state.center.box_index())
    }
}
