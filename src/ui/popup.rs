use std::fmt::Write;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use tracing::{error, warn, Span as LogSpan};

use super::locale::{messages, Messages};
use crate::config::Config;
use crate::message::{Request, Response};
use crate::shell::{is_platform_url, Tab, Transport};
use crate::stats::{AggregateStats, ExtractionResult, PostStats};

/// Compact form used in the panel: 1.2M, 3.4K, 999.
pub fn format_number(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupState {
    Loading,
    /// The active tab is not on the platform.
    Unsupported,
    /// Replaces the whole panel.
    Error(String),
    Ready(ExtractionResult),
}

pub struct Popup {
    state: PopupState,
    messages: &'static Messages,
    scroll_state: ListState,
}

impl Popup {
    pub fn new(config: &Config) -> Self {
        let mut scroll_state = ListState::default();
        scroll_state.select(Some(0));

        Self {
            state: PopupState::Loading,
            messages: messages(config.ui.locale),
            scroll_state,
        }
    }

    pub fn state(&self) -> &PopupState {
        &self.state
    }

    /// Ask the active tab for its stats and settle into the resulting state.
    pub async fn load(
        &mut self,
        transport: &dyn Transport,
        tab: Option<&Tab>,
        config: &Config,
        span: &LogSpan,
    ) {
        let Some(tab) = tab else {
            error!(parent: span, "no active tab");
            self.state = PopupState::Error(format!(
                "{}: {}",
                self.messages.unexpected_prefix, self.messages.no_active_tab
            ));
            return;
        };

        let on_platform = tab
            .url
            .as_deref()
            .is_some_and(|url| is_platform_url(url, &config.shell.platform_hosts));
        if !on_platform {
            self.state = PopupState::Unsupported;
            return;
        }

        self.state = match transport.send(tab.id, Request::GetStats).await {
            Err(e) => {
                error!(parent: span, error = %e, "runtime error");
                PopupState::Error(self.messages.retry.to_string())
            }
            Ok(Some(Response::Error { error })) => {
                error!(parent: span, %error, "response error");
                PopupState::Error(format!("{}: {}", self.messages.error_prefix, error))
            }
            Ok(Some(Response::Stats(result))) => PopupState::Ready(result),
            Ok(None) => {
                warn!(parent: span, "content script sent no response");
                PopupState::Error(self.messages.retry.to_string())
            }
        };
        self.scroll_state.select(Some(0));
    }

    fn posts(&self) -> &[PostStats] {
        match &self.state {
            PopupState::Ready(result) => &result.posts_data,
            _ => &[],
        }
    }

    pub fn scroll_up(&mut self) {
        if let Some(selected) = self.scroll_state.selected() {
            if selected > 0 {
                self.scroll_state.select(Some(selected - 1));
            }
        }
    }

    pub fn scroll_down(&mut self) {
        if let Some(selected) = self.scroll_state.selected() {
            if selected < self.posts().len().saturating_sub(1) {
                self.scroll_state.select(Some(selected + 1));
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" {} ", self.messages.title))
            .title_bottom(Line::from(self.messages.help).style(Style::default().fg(Color::DarkGray)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let result = match &self.state {
            PopupState::Loading => {
                frame.render_widget(Paragraph::new(self.messages.loading).block(block), area);
                return;
            }
            PopupState::Unsupported => {
                let text = Paragraph::new(self.messages.unsupported_page)
                    .wrap(Wrap { trim: true })
                    .block(block);
                frame.render_widget(text, area);
                return;
            }
            PopupState::Error(message) => {
                let text = Paragraph::new(message.as_str())
                    .style(Style::default().fg(Color::Red))
                    .wrap(Wrap { trim: true })
                    .block(block);
                frame.render_widget(text, area);
                return;
            }
            PopupState::Ready(result) => result,
        };

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Min(0)])
            .split(inner);

        self.render_totals(frame, chunks[0], &result.total_stats);
        self.render_posts(frame, chunks[1], &result.posts_data);
    }

    fn render_totals(&self, frame: &mut Frame, area: Rect, total: &AggregateStats) {
        let label = Style::default().fg(Color::DarkGray);
        let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
        let lines: Vec<Line> = [
            (self.messages.comments, total.comments),
            (self.messages.reposts, total.reposts),
            (self.messages.likes, total.likes),
            (self.messages.views, total.views),
        ]
        .into_iter()
        .map(|(name, n)| {
            Line::from(vec![
                Span::styled(format!("{}: ", name), label),
                Span::styled(format_number(n), value),
            ])
        })
        .collect();

        let totals = Paragraph::new(lines).block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(totals, area);
    }

    fn render_posts(&self, frame: &mut Frame, area: Rect, posts: &[PostStats]) {
        if posts.is_empty() {
            frame.render_widget(Paragraph::new(self.messages.no_posts), area);
            return;
        }

        let items: Vec<ListItem> = posts
            .iter()
            .map(|post| {
                let header = Line::from(Span::styled(
                    post.date.as_str(),
                    Style::default().fg(Color::Cyan),
                ));
                let text = Line::from(Span::styled(
                    post.text.as_str(),
                    Style::default().fg(Color::White),
                ));
                let stats = Line::from(Span::styled(
                    self.post_line(post),
                    Style::default().fg(Color::DarkGray),
                ));
                ListItem::new(vec![header, text, stats])
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().title(format!(" {} ", self.messages.posts)))
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            );

        let mut state = self.scroll_state.clone();
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn post_line(&self, post: &PostStats) -> String {
        format!(
            "{} {} | {} {} | {} {} | {} {}",
            self.messages.comments,
            format_number(post.comments),
            self.messages.reposts,
            format_number(post.reposts),
            self.messages.likes,
            format_number(post.likes),
            self.messages.views,
            format_number(post.views),
        )
    }

    /// Plain-text rendering of the same panel.
    pub fn render_plain(&self) -> String {
        let result = match &self.state {
            PopupState::Loading => return self.messages.loading.to_string(),
            PopupState::Unsupported => return self.messages.unsupported_page.to_string(),
            PopupState::Error(message) => return message.clone(),
            PopupState::Ready(result) => result,
        };

        let total = &result.total_stats;
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.messages.title);
        let _ = writeln!(out, "{}: {}", self.messages.comments, format_number(total.comments));
        let _ = writeln!(out, "{}: {}", self.messages.reposts, format_number(total.reposts));
        let _ = writeln!(out, "{}: {}", self.messages.likes, format_number(total.likes));
        let _ = writeln!(out, "{}: {}", self.messages.views, format_number(total.views));
        let _ = writeln!(out);

        if result.posts_data.is_empty() {
            let _ = writeln!(out, "{}", self.messages.no_posts);
            return out;
        }
        for post in &result.posts_data {
            let _ = writeln!(out, "{}", post.date);
            let _ = writeln!(out, "{}", post.text);
            let _ = writeln!(
                out,
                "💬 {}  🔄 {}  ❤️ {}  👁️ {}",
                format_number(post.comments),
                format_number(post.reposts),
                format_number(post.likes),
                format_number(post.views),
            );
            let _ = writeln!(out);
        }
        out
    }
}
