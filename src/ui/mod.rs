mod form;
mod quiz;
pub mod terminal;

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{prelude::*, widgets::Block};

use crate::app::question_form::FormField;
use crate::app::quiz_view::QuizPhase;
use crate::app::{App, Route};
use crate::core::QuizBackend;
use crate::domain::model::OptionLabel;

const POLL_INTERVAL: Duration = Duration::from_millis(200);

pub fn render<B: QuizBackend>(frame: &mut Frame, app: &App<B>) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    let chunks = Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).split(area);
    render_navigation(frame, chunks[0], app.route());

    match app.route() {
        Route::TakeQuiz => quiz::render(frame, chunks[1], &app.quiz),
        Route::AddQuestion => form::render(frame, chunks[1], &app.form),
    }
}

fn render_navigation(frame: &mut Frame, area: Rect, route: Route) {
    let tab = |key: &'static str, name: &'static str, active: bool| {
        let style = if active {
            Style::default().fg(Color::Black).bg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        Span::styled(format!(" {} {} ", key, name), style)
    };

    let line = Line::from(vec![
        Span::styled(" Quiz Application ", Style::default().fg(Color::Cyan).bold()),
        Span::raw("  "),
        tab("F1", "Take Quiz", route == Route::TakeQuiz),
        Span::raw(" "),
        tab("F2", "Add Question", route == Route::AddQuestion),
    ]);
    frame.render_widget(line, area);
}

/// Takes over the terminal until the user quits.
pub async fn run<B: QuizBackend>(app: &mut App<B>) -> io::Result<()> {
    let mut term = terminal::init()?;
    let result = run_event_loop(&mut term, app).await;
    terminal::restore()?;
    result
}

async fn run_event_loop<B: QuizBackend>(
    terminal: &mut terminal::AppTerminal,
    app: &mut App<B>,
) -> io::Result<()> {
    loop {
        app.tick(Instant::now());
        terminal.draw(|frame| render(frame, app))?;

        // draw the loading/busy state first, then make the call
        if app.run_pending().await {
            continue;
        }

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if handle_key(app, key) {
                break;
            }
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
pub fn handle_key<B: QuizBackend>(app: &mut App<B>, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => return true,
        KeyCode::Char('c') if ctrl => return true,
        KeyCode::F(1) => {
            app.navigate(Route::TakeQuiz);
            return false;
        }
        KeyCode::F(2) => {
            app.navigate(Route::AddQuestion);
            return false;
        }
        _ => {}
    }

    match app.route() {
        Route::TakeQuiz => handle_quiz_key(app, key.code),
        Route::AddQuestion => handle_form_key(app, key.code, ctrl),
    }
    false
}

fn handle_quiz_key<B: QuizBackend>(app: &mut App<B>, key: KeyCode) {
    let quiz = &mut app.quiz;
    let phase = quiz.phase().clone();
    match (&phase, key) {
        (QuizPhase::Failed(_), KeyCode::Char('r') | KeyCode::Enter) => quiz.begin_loading(),
        (QuizPhase::Submitted(_), KeyCode::Char('r') | KeyCode::Enter) => quiz.reset(),
        (QuizPhase::Ready, KeyCode::Up | KeyCode::Char('k')) => quiz.focus_previous(),
        (QuizPhase::Ready, KeyCode::Down | KeyCode::Char('j')) => quiz.focus_next(),
        (QuizPhase::Ready, KeyCode::Left | KeyCode::Char('h')) => quiz.cycle_focused(false),
        (QuizPhase::Ready, KeyCode::Right | KeyCode::Char('l')) => quiz.cycle_focused(true),
        (QuizPhase::Ready, KeyCode::Enter | KeyCode::Char('s')) => {
            quiz.begin_submit();
        }
        (QuizPhase::Ready, KeyCode::Char(c)) => {
            if let Some(label) = OptionLabel::from_char(c) {
                quiz.select_focused(label);
            }
        }
        _ => {}
    }
}

fn handle_form_key<B: QuizBackend>(app: &mut App<B>, key: KeyCode, ctrl: bool) {
    let form = &mut app.form;
    if form.is_busy() {
        return;
    }

    match key {
        KeyCode::Char('r') if ctrl => form.reset(),
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_previous(),
        KeyCode::Enter => {
            form.begin_submit();
        }
        KeyCode::Left | KeyCode::Right => {
            let forward = key == KeyCode::Right;
            match form.focus() {
                FormField::CorrectAnswer => form.cycle_correct_answer(forward),
                FormField::Difficulty => form.cycle_difficulty(forward),
                _ => {}
            }
        }
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char(c) if !ctrl => form.push_char(c),
        _ => {}
    }
}
