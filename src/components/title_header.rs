use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use ratatui::{Frame, layout::Rect};

use super::Component;
use crate::action::Action;

/// Rows reserved for the banner; artbox falls back to smaller fonts below this.
pub const TITLE_HEIGHT: u16 = 6;

/// Ticks for the gradient to travel end to end while refreshing
const SHIMMER_CYCLE_TICKS: u32 = 24;

const MAIZE: (u8, u8, u8) = (255, 203, 5);
const BLUE: (u8, u8, u8) = (90, 140, 220);

pub struct TitleHeader;

pub struct TitleHeaderProps<'a> {
    pub title: &'a str,
    pub is_animating: bool,
    pub tick_count: u32,
}

fn shimmer(tick_count: u32) -> f32 {
    let cycle = SHIMMER_CYCLE_TICKS.max(1);
    let t = (tick_count % cycle) as f32 / cycle as f32;
    // Triangle wave so the colors slide back and forth
    if t < 0.5 { t * 2.0 } else { (1.0 - t) * 2.0 }
}

fn title_fill(is_animating: bool, tick_count: u32) -> Fill {
    let maize = ArtColor::rgb(MAIZE.0, MAIZE.1, MAIZE.2);
    let blue = ArtColor::rgb(BLUE.0, BLUE.1, BLUE.2);
    let phase = if is_animating { shimmer(tick_count) } else { 0.0 };
    let start = maize.interpolate(blue, phase);
    let end = blue.interpolate(maize, phase);
    Fill::Linear(LinearGradient::horizontal(start, end))
}

impl Component<Action> for TitleHeader {
    type Props<'a> = TitleHeaderProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(title_fill(props.is_animating, props.tick_count));

        frame.render_widget(ArtBox::new(&renderer, props.title), area);
    }
}
