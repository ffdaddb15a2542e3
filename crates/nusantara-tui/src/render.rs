use crate::app::{App, MenuState, ScreenState};
use crate::stats::format_time;
use crate::theme::Theme;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use nusantara_core::{Difficulty, GameStatus, InputMode, Position, MAX_ERRORS};
use std::io;

const GRID_WIDTH: u16 = 37;
const GRID_HEIGHT: u16 = 19;

pub fn render(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;

    execute!(stdout, Hide, Clear(ClearType::All))?;

    match app.screen_state {
        ScreenState::Playing => render_game_screen(stdout, app, term_width, term_height)?,
        ScreenState::Win => render_endgame_screen(stdout, app, term_width, term_height, true)?,
        ScreenState::Lose => render_endgame_screen(stdout, app, term_width, term_height, false)?,
        ScreenState::Stats => render_stats_screen(stdout, app, term_width)?,
    }

    execute!(stdout, Show)?;
    Ok(())
}

fn render_game_screen(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    // Board plus a side panel, centered when the terminal allows it.
    let total_width = GRID_WIDTH + 28;
    let start_x = if term_width > total_width {
        (term_width - total_width) / 2
    } else {
        1
    };
    let start_y = if term_height > GRID_HEIGHT + 6 { 2 } else { 1 };

    render_banner(stdout, app, start_x, start_y - 1)?;
    render_grid(stdout, app, start_x, start_y + 1)?;
    render_info_panel(stdout, app, start_x + GRID_WIDTH + 3, start_y + 1)?;
    render_controls(stdout, app, start_x, start_y + GRID_HEIGHT + 2)?;

    if let Some(ref msg) = app.message {
        render_message(stdout, app, msg, term_width, start_y + GRID_HEIGHT + 5)?;
    }

    if app.menu == MenuState::NewGame {
        render_menu(stdout, app, term_width, term_height)?;
    }

    Ok(())
}

fn render_banner(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let culture = app.game.difficulty().culture();
    execute!(
        stdout,
        MoveTo(x, y),
        SetBackgroundColor(app.theme.bg),
        SetForegroundColor(Theme::accent(app.game.difficulty())),
        Print(format!(
            "{} Sudoku Nusantara - {} ({})",
            culture.icon, culture.name, culture.level
        ))
    )?;
    execute!(
        stdout,
        MoveTo(x, y + 1),
        SetForegroundColor(app.theme.info),
        Print(culture.tagline)
    )?;
    Ok(())
}

fn render_grid(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;

    execute!(
        stdout,
        MoveTo(x, y),
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.box_border),
        Print("+===+===+===+===+===+===+===+===+===+")
    )?;

    for row in 0..9 {
        let cell_y = y + 1 + row as u16 * 2;
        execute!(stdout, MoveTo(x, cell_y))?;

        for col in 0..9 {
            // Thick borders at 3x3 boundaries
            if col % 3 == 0 {
                execute!(stdout, SetForegroundColor(theme.box_border), Print("\u{2551}"))?;
            } else {
                execute!(stdout, SetForegroundColor(theme.border), Print("\u{2502}"))?;
            }
            render_cell(stdout, app, Position::new(row, col))?;
        }
        execute!(stdout, SetForegroundColor(theme.box_border), Print("\u{2551}"))?;

        execute!(stdout, MoveTo(x, cell_y + 1))?;
        if (row + 1) % 3 == 0 {
            execute!(
                stdout,
                SetForegroundColor(theme.box_border),
                Print("+===+===+===+===+===+===+===+===+===+")
            )?;
        } else {
            execute!(
                stdout,
                SetForegroundColor(theme.border),
                Print("+---+---+---+---+---+---+---+---+---+")
            )?;
        }
    }

    Ok(())
}

fn render_cell(stdout: &mut io::Stdout, app: &App, pos: Position) -> io::Result<()> {
    let theme = &app.theme;
    let game = &app.game;
    let is_cursor = pos == app.cursor;

    let bg = if is_cursor {
        theme.selected_bg
    } else if app.in_flash(pos) {
        theme.success
    } else if app.has_same_value(pos) && !game.is_paused() {
        theme.highlight_bg
    } else if app.is_highlighted(pos) {
        theme.highlight_bg
    } else {
        theme.bg
    };

    let fg = if game.is_wrong(pos) {
        theme.error
    } else if game.is_fixed(pos) {
        theme.given
    } else if game.value(pos) != 0 {
        theme.filled
    } else {
        theme.note
    };

    // The board is hidden while paused.
    let text = if game.is_paused() {
        "   ".to_string()
    } else {
        let value = game.value(pos);
        if value != 0 {
            format!(" {} ", value)
        } else if let Some(notes) = game.notes(pos) {
            // Three characters only; show the first notes jotted down.
            let mut digits: String = notes.iter().take(3).map(|d| d.to_string()).collect();
            while digits.len() < 3 {
                digits.push(' ');
            }
            digits
        } else {
            "   ".to_string()
        }
    };

    execute!(
        stdout,
        SetBackgroundColor(bg),
        SetForegroundColor(fg),
        Print(text),
        SetBackgroundColor(theme.bg)
    )?;
    Ok(())
}

fn render_info_panel(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let game = &app.game;

    let status_text = match game.status() {
        GameStatus::NotStarted => "Siap mulai",
        GameStatus::InProgress if game.is_paused() => "Jeda",
        GameStatus::InProgress => "Bermain",
        GameStatus::Won => "Menang!",
        GameStatus::Lost => "Kalah",
    };

    let lines = [
        format!("Waktu     {}", app.timer_text()),
        format!("Kesalahan {}/{}", game.errors(), MAX_ERRORS),
        format!("Petunjuk  {}", game.hints_left()),
        format!(
            "Mode      {}",
            match game.mode() {
                InputMode::Normal => "normal",
                InputMode::Notes => "catatan",
            }
        ),
        format!("Status    {}", status_text),
        String::new(),
        format!("Terisi    {}/81", game.puzzle().filled_count()),
    ];

    for (i, line) in lines.iter().enumerate() {
        execute!(
            stdout,
            MoveTo(x, y + i as u16 * 2),
            SetBackgroundColor(theme.bg),
            SetForegroundColor(theme.info),
            Print(line)
        )?;
    }

    if let Some(best) = app.stats.stats.best_time(game.difficulty()) {
        execute!(
            stdout,
            MoveTo(x, y + lines.len() as u16 * 2),
            SetForegroundColor(theme.success),
            Print(format!("Terbaik   {}", format_time(best)))
        )?;
    }

    Ok(())
}

fn render_controls(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let rows = [
        "panah gerak  1-9 isi  0 hapus  n catatan  h petunjuk",
        "p jeda  r ulang  g daerah  i statistik  q keluar",
    ];
    for (i, row) in rows.iter().enumerate() {
        execute!(
            stdout,
            MoveTo(x, y + i as u16),
            SetBackgroundColor(theme.bg),
            SetForegroundColor(theme.key),
            Print(row)
        )?;
    }
    Ok(())
}

fn render_message(
    stdout: &mut io::Stdout,
    app: &App,
    msg: &str,
    term_width: u16,
    y: u16,
) -> io::Result<()> {
    let x = centered_x(term_width, msg.len() as u16);
    execute!(
        stdout,
        MoveTo(x, y),
        SetBackgroundColor(app.theme.bg),
        SetForegroundColor(app.theme.fg),
        Print(msg)
    )?;
    Ok(())
}

fn render_menu(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let tiers = Difficulty::all();
    let height = tiers.len() as u16 + 4;
    let width: u16 = 46;
    let x = centered_x(term_width, width);
    let y = if term_height > height { (term_height - height) / 2 } else { 0 };

    execute!(
        stdout,
        MoveTo(x, y),
        SetBackgroundColor(theme.highlight_bg),
        SetForegroundColor(theme.fg),
        Print(format!("{:^width$}", "Pilih Daerah", width = width as usize))
    )?;

    for (i, difficulty) in tiers.into_iter().enumerate() {
        let culture = difficulty.culture();
        let label = format!(
            " {} {} - {} ({} petak kosong)",
            culture.icon,
            culture.name,
            culture.level,
            difficulty.removed_cells()
        );
        let selected = i == app.menu_selection;
        execute!(
            stdout,
            MoveTo(x, y + 2 + i as u16),
            SetBackgroundColor(if selected { theme.selected_bg } else { theme.highlight_bg }),
            SetForegroundColor(if selected {
                theme.key
            } else {
                Theme::accent(difficulty)
            }),
            Print(format!("{:<width$}", label, width = width as usize))
        )?;
    }

    execute!(
        stdout,
        MoveTo(x, y + height - 1),
        SetBackgroundColor(theme.highlight_bg),
        SetForegroundColor(theme.info),
        Print(format!(
            "{:^width$}",
            "enter pilih - esc batal",
            width = width as usize
        ))
    )?;
    Ok(())
}

fn render_endgame_screen(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
    won: bool,
) -> io::Result<()> {
    let theme = &app.theme;
    let culture = app.game.difficulty().culture();
    let y = (term_height / 2).saturating_sub(4);

    let (title, color) = if won {
        ("SELAMAT! Teka-teki selesai!", theme.success)
    } else {
        ("Permainan berakhir - kesempatan habis", theme.error)
    };

    let mut lines: Vec<String> = vec![
        format!("{} {} ({})", culture.icon, culture.name, culture.level),
        title.to_string(),
        format!("Waktu: {}", app.timer_text()),
        format!(
            "Kesalahan: {}/{}  Petunjuk tersisa: {}",
            app.game.errors(),
            MAX_ERRORS,
            app.game.hints_left()
        ),
    ];
    if won && app.new_best {
        lines.push("Rekor waktu baru!".to_string());
    }
    lines.push(String::new());
    lines.push("enter main lagi - g daerah lain - esc lihat papan - q keluar".to_string());

    for (i, line) in lines.iter().enumerate() {
        let fg = if i == 1 { color } else { theme.fg };
        execute!(
            stdout,
            MoveTo(centered_x(term_width, line.chars().count() as u16), y + i as u16 * 2),
            SetBackgroundColor(theme.bg),
            SetForegroundColor(fg),
            Print(line)
        )?;
    }
    Ok(())
}

fn render_stats_screen(stdout: &mut io::Stdout, app: &App, term_width: u16) -> io::Result<()> {
    let theme = &app.theme;
    let stats = &app.stats.stats;
    let x = centered_x(term_width, 44);

    let header = [
        "Statistik Pemain".to_string(),
        String::new(),
        format!("Permainan dimainkan  {}", stats.games_played),
        format!("Permainan dimenangkan {}", stats.games_won),
        format!("Tingkat kemenangan   {:.1}%", stats.win_rate()),
        String::new(),
        "Waktu terbaik per daerah:".to_string(),
    ];
    for (i, line) in header.iter().enumerate() {
        execute!(
            stdout,
            MoveTo(x, 2 + i as u16),
            SetBackgroundColor(theme.bg),
            SetForegroundColor(theme.fg),
            Print(line)
        )?;
    }

    for (i, difficulty) in Difficulty::all().into_iter().enumerate() {
        let culture = difficulty.culture();
        let best = match stats.best_time(difficulty) {
            Some(secs) => format_time(secs),
            None => "--:--".to_string(),
        };
        execute!(
            stdout,
            MoveTo(x, 2 + header.len() as u16 + i as u16),
            SetForegroundColor(Theme::accent(difficulty)),
            Print(format!("  {:<14} {}", culture.name, best))
        )?;
    }

    execute!(
        stdout,
        MoveTo(x, 2 + header.len() as u16 + 7),
        SetForegroundColor(theme.info),
        Print("esc kembali")
    )?;
    Ok(())
}

fn centered_x(term_width: u16, content_width: u16) -> u16 {
    if term_width > content_width {
        (term_width - content_width) / 2
    } else {
        0
    }
}
