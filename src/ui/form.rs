use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::question_form::{FormField, FormMessage, QuestionForm};
use crate::domain::model::OptionLabel;

fn field_label(field: FormField) -> String {
    match field {
        FormField::QuestionText => "Question Text *".to_string(),
        FormField::Option(label) => format!("Option {}", label),
        FormField::CorrectAnswer => "Correct Answer *".to_string(),
        FormField::Difficulty => "Difficulty Level".to_string(),
    }
}

fn field_value(form: &QuestionForm, field: FormField) -> String {
    match field {
        FormField::CorrectAnswer => match form.correct_answer() {
            Some(label) => format!("{}. {}", label, form.text(FormField::Option(label))),
            None => "Select correct answer".to_string(),
        },
        FormField::Difficulty => form.difficulty().to_string(),
        text_field => form.text(text_field).to_string(),
    }
}

fn placeholder(field: FormField) -> &'static str {
    match field {
        FormField::QuestionText => "Enter your question here...",
        FormField::Option(OptionLabel::A) => "First option",
        FormField::Option(OptionLabel::B) => "Second option",
        FormField::Option(OptionLabel::C) => "Third option (optional)",
        FormField::Option(OptionLabel::D) => "Fourth option (optional)",
        FormField::CorrectAnswer | FormField::Difficulty => "",
    }
}

pub fn render(frame: &mut Frame, area: Rect, form: &QuestionForm) {
    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    let title = vec![
        Line::from(Span::styled("Add New Question", Style::default().fg(Color::Cyan).bold())),
        Line::from(Span::styled(
            "Fill in the details below to add a new question to the quiz.",
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(Paragraph::new(title), chunks[0]);

    render_message(frame, chunks[1], form);
    render_fields(frame, chunks[2], form);
    render_controls(frame, chunks[3], form);
}

fn render_message(frame: &mut Frame, area: Rect, form: &QuestionForm) {
    let line = match form.message() {
        Some(FormMessage::Success(text)) => {
            Line::from(Span::styled(text, Style::default().fg(Color::Green).bold()))
        }
        Some(FormMessage::Error(text)) => {
            Line::from(Span::styled(text, Style::default().fg(Color::Red).bold()))
        }
        None => Line::from(""),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_fields(frame: &mut Frame, area: Rect, form: &QuestionForm) {
    let mut lines: Vec<Line> = Vec::with_capacity(FormField::ORDER.len() * 2);

    for field in FormField::ORDER {
        let focused = field == form.focus();
        let label_style = if focused {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };

        let value = field_value(form, field);
        let mut spans = vec![
            Span::styled(if focused { " > " } else { "   " }, label_style),
            Span::styled(format!("{:<18}", field_label(field)), label_style),
        ];

        if value.is_empty() {
            spans.push(Span::styled(placeholder(field), Style::default().fg(Color::DarkGray)));
        } else {
            spans.push(Span::styled(value, Style::default().fg(Color::White)));
        }

        if focused && field.is_text() {
            spans.push(Span::styled("_", Style::default().fg(Color::Cyan)));
        } else if focused {
            spans.push(Span::styled("  ◂ ▸", Style::default().fg(Color::DarkGray)));
        }

        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Color::DarkGray)
            .padding(Padding::vertical(1)),
    );
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, form: &QuestionForm) {
    let text = if form.is_busy() {
        "Adding..."
    } else {
        "tab/↑↓ field  ·  ←→ choose  ·  enter Add Question  ·  ctrl-r Reset Form  ·  F1 quiz  ·  esc quit"
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
