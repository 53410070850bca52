//! Settings View - resolved configuration and build info

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::commands::{Output, config_show};
use crate::config::ResolvedConfig;

/// Render the same settings report as `mc config show -H`.
pub fn render_settings(
    frame: &mut Frame,
    area: Rect,
    config: &ResolvedConfig,
    data_location: &str,
) {
    let report = config_show(config, data_location).to_human();
    let lines: Vec<Line> = report
        .lines()
        .skip(1)
        .map(|l| Line::from(format!(" {}", l)))
        .collect();
    let settings = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Settings ")
            .title_bottom(" Edit config.kdl to change these values "),
    );
    frame.render_widget(settings, area);
}
