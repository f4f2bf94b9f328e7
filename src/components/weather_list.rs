use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_dispatch::{DataResource, EventKind};
use tui_dispatch_components::{
    BaseStyle, Padding, ScrollbarStyle, SelectList, SelectListBehavior, SelectListProps,
    SelectListStyle, SelectionStyle,
};

use super::Component;
use crate::action::Action;
use crate::state::{AppState, ConditionIcon, TempUnit, WeatherEntry};

pub const ERROR_ICON: &str = "\u{26a0}\u{fe0f}";

/// Width of the temperature column, e.g. `-104°F`
const TEMP_WIDTH: usize = 6;

#[derive(Default)]
pub struct WeatherList {
    list: SelectList,
}

pub struct WeatherListProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
    pub on_select: fn(usize) -> Action,
}

fn icon_style(icon: ConditionIcon) -> Style {
    match icon {
        ConditionIcon::Clear => Style::default().fg(Color::Yellow),
        ConditionIcon::Clouds => Style::default().fg(Color::Gray),
        ConditionIcon::Rain => Style::default().fg(Color::Cyan),
        ConditionIcon::Unknown => Style::default().fg(Color::DarkGray),
    }
}

/// Format one row: city, temperature, icon
pub fn row_line(entry: &WeatherEntry, unit: TempUnit, name_width: usize) -> Line<'static> {
    let temp_style = if entry.kelvin.is_some() {
        Style::default().fg(Color::Reset).bold()
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Line::from(vec![
        Span::raw(format!("{:<name_width$}", entry.city)),
        Span::raw("  "),
        Span::styled(
            format!("{:>width$}", entry.temperature(unit), width = TEMP_WIDTH),
            temp_style,
        ),
        Span::raw("  "),
        Span::styled(entry.icon.glyph(), icon_style(entry.icon)),
    ])
}

impl WeatherList {
    fn rows(entries: &[WeatherEntry], unit: TempUnit) -> Vec<Line<'static>> {
        let name_width = entries
            .iter()
            .map(|e| e.city.chars().count())
            .max()
            .unwrap_or(0);
        entries
            .iter()
            .map(|entry| row_line(entry, unit, name_width))
            .collect()
    }

    fn list_style() -> SelectListStyle {
        SelectListStyle {
            base: BaseStyle {
                border: None,
                padding: Padding::xy(2, 1),
                bg: None,
                fg: None,
            },
            selection: SelectionStyle::default(),
            scrollbar: ScrollbarStyle::default(),
        }
    }
}

impl Component<Action> for WeatherList {
    type Props<'a> = WeatherListProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let entries = props.state.entries();
        if !props.is_focused || entries.is_empty() {
            return Vec::new();
        }
        let EventKind::Key(key) = event else {
            return Vec::new();
        };
        if !matches!(
            key.code,
            KeyCode::Up | KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('k')
        ) {
            return Vec::new();
        }

        let items = Self::rows(entries, props.state.unit);
        let list_props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: props.state.selected,
            is_focused: true,
            style: Self::list_style(),
            behavior: SelectListBehavior::default(),
            on_select: props.on_select,
            render_item: &|item| item.clone(),
        };
        self.list
            .handle_event(event, list_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        match &props.state.weather {
            DataResource::Loaded(entries) if !entries.is_empty() => {
                let items = Self::rows(entries, props.state.unit);
                let list_props = SelectListProps {
                    items: &items,
                    count: items.len(),
                    selected: props.state.selected,
                    is_focused: props.is_focused,
                    style: Self::list_style(),
                    behavior: SelectListBehavior::default(),
                    on_select: props.on_select,
                    render_item: &|item| item.clone(),
                };
                self.list.render(frame, area, list_props);
            }
            DataResource::Loaded(_) => render_hint(frame, area, "a", " to add a city"),
            DataResource::Loading => render_message(frame, area, "Loading weather..."),
            DataResource::Failed(error) => render_error(frame, area, error),
            DataResource::Empty => render_hint(frame, area, "r", " to fetch weather"),
        }
    }
}

fn centered_rows(area: Rect, rows: u16) -> std::rc::Rc<[Rect]> {
    Layout::vertical((0..rows).map(|_| Constraint::Length(1)))
        .flex(Flex::Center)
        .split(area)
}

fn render_message(frame: &mut Frame, area: Rect, message: &str) {
    let chunks = centered_rows(area, 1);
    let line = Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(Color::DarkGray),
    ))
    .centered();
    frame.render_widget(Paragraph::new(line), chunks[0]);
}

fn render_hint(frame: &mut Frame, area: Rect, key: &str, rest: &str) {
    let chunks = centered_rows(area, 1);
    let line = Line::from(vec![
        Span::styled("Press ", Style::default().fg(Color::DarkGray)),
        Span::styled(key.to_string(), Style::default().fg(Color::Cyan).bold()),
        Span::styled(rest.to_string(), Style::default().fg(Color::DarkGray)),
    ])
    .centered();
    frame.render_widget(Paragraph::new(line), chunks[0]);
}

fn render_error(frame: &mut Frame, area: Rect, error: &str) {
    let chunks = centered_rows(area, 4);
    let lines = [
        Line::from(ERROR_ICON),
        Line::from(Span::styled("Error", Style::default().fg(Color::Red).bold())),
        Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Rgb(200, 100, 100)),
        )),
    ];
    for (line, chunk) in lines.into_iter().zip(chunks.iter()) {
        frame.render_widget(Paragraph::new(line.centered()), *chunk);
    }
    let retry = Line::from(vec![
        Span::styled("Press ", Style::default().fg(Color::DarkGray)),
        Span::styled("r", Style::default().fg(Color::Cyan).bold()),
        Span::styled(" to retry", Style::default().fg(Color::DarkGray)),
    ])
    .centered();
    frame.render_widget(Paragraph::new(retry), chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_row_alignment() {
        let entry = WeatherEntry {
            city: "Oakland".into(),
            kelvin: Some(290.0),
            icon: ConditionIcon::Clouds,
        };
        let line = row_line(&entry, TempUnit::Fahrenheit, 13);
        assert_eq!(plain(&line), "Oakland          63°F  ☁");
    }

    #[test]
    fn test_placeholder_row() {
        let entry = WeatherEntry::unresolved("Freemont");
        let line = row_line(&entry, TempUnit::Fahrenheit, 8);
        assert_eq!(plain(&line), "Freemont    ??°F  ?");
    }
}
