use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{
    Component, ERROR_ICON, TITLE_HEIGHT, TitleHeader, TitleHeaderProps, WeatherList,
    WeatherListProps,
};
use crate::action::Action;
use crate::state::AppState;

pub const APP_TITLE: &str = "Weather";

/// Props for WeatherDisplay - read-only view of state
pub struct WeatherDisplayProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The main screen: title, city list, last-updated line and key hints
#[derive(Default)]
pub struct WeatherDisplay {
    list: WeatherList,
}

impl WeatherDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

fn updated_line(state: &AppState) -> Line<'static> {
    let dim = Style::default().fg(Color::DarkGray);
    if state.is_busy() {
        return Line::from(vec![
            Span::styled(state.spinner(), Style::default().fg(Color::Cyan)),
            Span::styled(" Refreshing...", dim),
        ])
        .centered();
    }
    if let Some(error) = &state.refresh_error {
        return Line::from(vec![
            Span::raw(ERROR_ICON),
            Span::styled(
                format!(" {error}"),
                Style::default().fg(Color::Rgb(200, 100, 100)),
            ),
        ])
        .centered();
    }
    let stamp = state.last_updated.clone().unwrap_or_default();
    Line::from(vec![
        Span::styled("Last Updated: ", dim),
        Span::styled(stamp, Style::default().fg(Color::Rgb(255, 203, 5))),
    ])
    .centered()
}

impl Component<Action> for WeatherDisplay {
    type Props<'a> = WeatherDisplayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('r') | KeyCode::F(5) => vec![Action::WeatherFetch],
                KeyCode::Char('a') | KeyCode::Char('+') => vec![Action::InputOpen],
                KeyCode::Char('u') => vec![Action::UiToggleUnits],
                KeyCode::Char('q') | KeyCode::Esc => vec![Action::Quit],
                _ => self
                    .list
                    .handle_event(
                        event,
                        WeatherListProps {
                            state: props.state,
                            is_focused: true,
                            on_select: Action::ListSelect,
                        },
                    )
                    .into_iter()
                    .collect(),
            },
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: WeatherDisplayProps<'_>) {
        let chunks = Layout::vertical([
            Constraint::Length(TITLE_HEIGHT), // Title
            Constraint::Min(1),               // City list
            Constraint::Length(1),            // Last updated
            Constraint::Length(1),            // Help bar
        ])
        .split(area);

        let mut header = TitleHeader;
        header.render(
            frame,
            chunks[0],
            TitleHeaderProps {
                title: APP_TITLE,
                is_animating: props.state.is_busy(),
                tick_count: props.state.tick_count,
            },
        );

        self.list.render(
            frame,
            chunks[1],
            WeatherListProps {
                state: props.state,
                is_focused: props.is_focused,
                on_select: Action::ListSelect,
            },
        );

        frame.render_widget(Paragraph::new(updated_line(props.state)), chunks[2]);

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[3],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("a", "add city"),
                    StatusBarHint::new("r", "refresh"),
                    StatusBarHint::new("u", "units"),
                    StatusBarHint::new("q", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}
