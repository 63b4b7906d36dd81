use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::quiz_view::{QuizPhase, QuizView};
use crate::domain::model::ScoreResult;

pub fn render(frame: &mut Frame, area: Rect, view: &QuizView) {
    match view.phase() {
        QuizPhase::Loading => render_notice(frame, area, "Loading questions...", Color::DarkGray),
        QuizPhase::Failed(message) => render_failure(frame, area, message),
        QuizPhase::Ready if view.questions().is_empty() => render_empty(frame, area),
        QuizPhase::Ready => render_questions(frame, area, view),
        QuizPhase::Submitted(score) => render_score(frame, area, score),
    }
}

fn render_notice(frame: &mut Frame, area: Rect, text: &str, color: Color) {
    let widget = Paragraph::new(text).alignment(Alignment::Center).fg(color);
    frame.render_widget(widget, centered_line(area));
}

fn centered_line(area: Rect) -> Rect {
    Layout::vertical([Constraint::Fill(1), Constraint::Length(3), Constraint::Fill(1)]).split(area)[1]
}

fn render_failure(frame: &mut Frame, area: Rect, message: &str) {
    let content = vec![
        Line::from(Span::styled(message, Style::default().fg(Color::Red).bold())),
        Line::from(""),
        Line::from(Span::styled("r retry", Style::default().fg(Color::DarkGray))),
    ];
    frame.render_widget(
        Paragraph::new(content).alignment(Alignment::Center),
        centered_line(area),
    );
}

fn render_empty(frame: &mut Frame, area: Rect) {
    let content = vec![
        Line::from(Span::styled(
            "No Questions Available",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "There are no questions in the database. Please add some questions first.",
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(
        Paragraph::new(content)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        centered_line(area),
    );
}

fn render_questions(frame: &mut Frame, area: Rect, view: &QuizView) {
    let chunks = Layout::vertical([Constraint::Fill(1), Constraint::Length(2)])
        .margin(1)
        .split(area);

    let mut lines: Vec<Line> = Vec::new();
    let mut focused_offset = 0;

    for (index, question) in view.questions().iter().enumerate() {
        let focused = index == view.cursor();
        if focused {
            focused_offset = lines.len();
        }
        let marker = if focused { ">" } else { " " };
        let text_style = if focused {
            Style::default().fg(Color::White).bold()
        } else {
            Style::default().fg(Color::Gray)
        };

        lines.push(Line::from(vec![
            Span::styled(format!("{} ", marker), Style::default().fg(Color::Cyan)),
            Span::styled(format!("{}. {}", index + 1, question.text()), text_style),
        ]));
        lines.push(Line::from(Span::styled(
            format!("    Difficulty: {}", question.difficulty()),
            Style::default().fg(Color::DarkGray),
        )));

        let chosen = view.answers().get(question.id);
        for (label, option) in question.present_options() {
            let selected = chosen == Some(label);
            let style = if selected {
                Style::default().fg(Color::Cyan).bold()
            } else {
                Style::default().fg(Color::Gray)
            };
            let radio = if selected { "(•)" } else { "( )" };
            lines.push(Line::from(Span::styled(
                format!("    {} {}. {}", radio, label, option),
                style,
            )));
        }
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((focused_offset as u16, 0));
    frame.render_widget(widget, chunks[0]);

    render_submit_bar(frame, chunks[1], view);
}

fn render_submit_bar(frame: &mut Frame, area: Rect, view: &QuizView) {
    let progress = format!(
        "Answered: {} / {} questions",
        view.answered_count(),
        view.questions().len()
    );
    let submit_style = if view.can_submit() {
        Style::default().fg(Color::Green).bold()
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let content = vec![
        Line::from(vec![
            Span::styled(progress, Style::default().fg(Color::Gray)),
            Span::raw("   "),
            Span::styled("[enter] Submit Quiz", submit_style),
        ]),
        Line::from(Span::styled(
            "j/k question  ·  a-d or h/l answer  ·  F2 add question  ·  esc quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(content).alignment(Alignment::Center), area);
}

fn score_color(score: u32) -> Color {
    match score {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_score(frame: &mut Frame, area: Rect, score: &ScoreResult) {
    let color = score_color(score.score);
    let content = vec![
        Line::from(Span::styled("RESULTS", Style::default().fg(Color::Cyan).bold())),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}%", score.score),
            Style::default().fg(color).bold(),
        )),
        Line::from(Span::styled(
            format!(
                "{} of {} answered questions correct",
                score.correct_answers, score.total_questions
            ),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "r take quiz again  ·  esc quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let area = Layout::vertical([Constraint::Fill(1), Constraint::Length(8), Constraint::Fill(1)])
        .split(area)[1];
    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::TOP | Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}
