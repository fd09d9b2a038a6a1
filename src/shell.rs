//! Line-based terminal front end for the chat widget and the site forms.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use chrono::{Datelike, Utc};
use log::{debug, warn};
use strum::VariantNames;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::careers::{
    ApplicationDraft, ApplyModal, CLOSE_DELAY, ESCAPE_KEY, ResumeFile, RolesBoard,
};
use crate::config::Config;
use crate::consult::{ConsultClient, ConsultDraft};
use crate::conversation::{ChatMessage, ChatWidget, QuickAction, Turn};
use crate::error::Result;
use crate::types::Package;

const HELP: &str = "Commands: /open, /close, /1../3 (quick questions), /consult, \
                    /roles, /apply [role or role number], /esc, /help, /quit. \
                    Anything else is sent to the chat.";

/// Drives the widget and forms from a line-oriented reader and writer.
pub struct Shell<R, W> {
    reader: R,
    writer: W,
    config: Config,
    widget: ChatWidget,
    roles_board: RolesBoard,
    apply_modal: ApplyModal,
    typing_delay: Duration,
}

impl<R, W> Shell<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W, config: Config) -> Self {
        let typing_delay = config.typing_delay;
        let roles_board = RolesBoard::new(config.live_roles.clone());
        Self {
            reader,
            writer,
            config,
            widget: ChatWidget::default(),
            roles_board,
            apply_modal: ApplyModal::default(),
            typing_delay,
        }
    }

    pub fn widget(&self) -> &ChatWidget {
        &self.widget
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Reads commands until `/quit` or end of input.
    pub async fn run(&mut self) -> Result<()> {
        let year = Utc::now().year();
        self.say(&format!("OAX · © {year}\n{HELP}")).await?;

        while let Some(line) = self.read_line().await? {
            let line = line.trim();
            let (command, argument) = line
                .split_once(' ')
                .map_or((line, ""), |(cmd, rest)| (cmd, rest.trim()));
            match (command, argument) {
                ("", _) => {}
                ("/quit", _) => break,
                ("/help", _) => self.say(HELP).await?,
                ("/open", _) => self.open_chat().await?,
                ("/close", _) => {
                    self.widget.close();
                    self.say("Chat closed.").await?;
                }
                ("/consult", _) => self.consult().await?,
                ("/roles", _) => self.show_roles().await?,
                ("/esc", _) => self.escape().await?,
                ("/apply", role) => self.apply(role).await?,
                (cmd, _) if menu_number(cmd).is_some() => {
                    self.quick_action(menu_number(cmd).unwrap_or_default())
                        .await?;
                }
                _ => self.chat(line).await?,
            }
        }

        debug!("Shell finished");
        Ok(())
    }

    async fn open_chat(&mut self) -> Result<()> {
        let opening = self.widget.open();
        if opening.is_empty() {
            let menu = self.widget.quick_actions();
            return self.print_menu(&menu).await;
        }
        for message in &opening.greeting {
            self.print_message(message).await?;
        }
        self.print_menu(&opening.menu).await
    }

    async fn chat(&mut self, text: &str) -> Result<()> {
        if !self.widget.is_expanded() {
            return self.say("The chat is closed. Type /open first.").await;
        }
        let turn = self.widget.submit(text);
        self.deliver(turn).await
    }

    async fn quick_action(&mut self, number: usize) -> Result<()> {
        if !self.widget.is_expanded() {
            return self.say("The chat is closed. Type /open first.").await;
        }
        match number.checked_sub(1).and_then(|index| self.widget.press(index)) {
            Some(turn) => self.deliver(Some(turn)).await,
            None => self.say("No such question.").await,
        }
    }

    async fn deliver(&mut self, turn: Option<Turn>) -> Result<()> {
        let Some(turn) = turn else {
            return Ok(());
        };
        self.print_message(&turn.user).await?;
        self.say("  …").await?;
        tokio::time::sleep(self.typing_delay).await;
        for reply in &turn.replies {
            self.print_message(reply).await?;
        }
        let menu = self.widget.quick_actions();
        self.print_menu(&menu).await
    }

    async fn consult(&mut self) -> Result<()> {
        let packages = Package::VARIANTS.join("/");
        let mut draft = ConsultDraft {
            name: self.prompt("Name").await?,
            company: self.prompt("Company (optional)").await?,
            contact: self.prompt("Email or phone").await?,
            ..ConsultDraft::default()
        };
        let package = self.prompt(&format!("Package ({packages})")).await?;
        match Package::from_str(package.trim()) {
            Ok(package) => draft.pick(package),
            Err(_) => draft.package = package,
        }
        draft.details = self.prompt("Project details").await?;

        let request = match draft.validate() {
            Ok(request) => request,
            Err(e) => return self.say(&e.user_message()).await,
        };
        let endpoint = match self.config.consult_endpoint() {
            Ok(endpoint) => endpoint.to_string(),
            Err(e) => return self.say(&e.user_message()).await,
        };

        self.say("Submitting...").await?;
        match ConsultClient::new(endpoint).submit(request).await {
            Ok(()) => self.say("Thanks! We'll be in touch shortly.").await,
            Err(e) => {
                warn!("Consultation submit failed: {e}");
                self.say(&e.user_message()).await
            }
        }
    }

    async fn show_roles(&mut self) -> Result<()> {
        self.roles_board.open();
        if self.roles_board.roles().is_empty() {
            return self.say("No open roles right now. /apply sends a general application.").await;
        }
        let lines: Vec<String> = self
            .roles_board
            .roles()
            .iter()
            .enumerate()
            .map(|(idx, role)| format!("  {}. {role}", idx + 1))
            .collect();
        self.say(&format!("Live roles:\n{}\nType /apply N to apply.", lines.join("\n")))
            .await
    }

    /// Escape closes whichever overlay is on top.
    async fn escape(&mut self) -> Result<()> {
        if self.roles_board.handle_key(ESCAPE_KEY) {
            return self.say("Live roles closed.").await;
        }
        if self.apply_modal.handle_key(ESCAPE_KEY) {
            return self.say("Application closed.").await;
        }
        Ok(())
    }

    async fn apply(&mut self, argument: &str) -> Result<()> {
        let role = match argument.parse::<usize>() {
            Ok(number) if self.roles_board.is_open() => {
                match self.roles_board.pick(number) {
                    Some(role) => role,
                    None => return self.say("No such role.").await,
                }
            }
            _ => {
                self.roles_board.close();
                argument.to_string()
            }
        };
        self.apply_modal.open_for_role(Some(&role));
        let role = self.apply_modal.role().to_string();
        self.say(&format!("Applying for: {role}")).await?;

        let mut draft = ApplicationDraft {
            full_name: self.prompt("Full name").await?,
            email: self.prompt("Email").await?,
            phone: self.prompt("Phone (optional)").await?,
            location: self.prompt("Location (optional)").await?,
            portfolio: self.prompt("Portfolio URL (optional)").await?,
            linkedin: self.prompt("LinkedIn URL (optional)").await?,
            cover_letter: self.prompt("Cover letter (optional)").await?,
            resume: None,
        };

        let resume_path = self.prompt("Resume path (PDF or DOCX)").await?;
        let resume_path = resume_path.trim();
        if !resume_path.is_empty() {
            match ResumeFile::from_path(Path::new(resume_path)).await {
                Ok(resume) => draft.resume = Some(resume),
                Err(e) => {
                    self.apply_modal.fail(e);
                    return self.print_status().await;
                }
            }
        }

        let Ok(pending) = self.apply_modal.prepare(&self.config, &draft) else {
            return self.print_status().await;
        };
        self.print_status().await?;

        let outcome = pending.send().await;
        let result = self.apply_modal.finish(outcome);
        self.print_status().await?;

        if let Ok(receipt) = result {
            if let Some(link) = receipt.resume_link {
                self.say(&format!("Resume stored at {link}")).await?;
            }
            tokio::time::sleep(CLOSE_DELAY).await;
            self.apply_modal.close();
        }
        Ok(())
    }

    async fn print_status(&mut self) -> Result<()> {
        let status = self.apply_modal.status().to_string();
        self.say(&status).await
    }

    async fn print_menu(&mut self, actions: &[QuickAction]) -> Result<()> {
        let menu: Vec<String> = actions
            .iter()
            .enumerate()
            .map(|(idx, action)| format!("  /{} {}", idx + 1, action.title))
            .collect();
        self.say(&menu.join("\n")).await
    }

    async fn print_message(&mut self, message: &ChatMessage) -> Result<()> {
        let speaker = if message.is_user { "you" } else { "oax" };
        let text = render_html(&message.body);
        self.say(&format!("{speaker}> {text}")).await
    }

    async fn prompt(&mut self, label: &str) -> Result<String> {
        self.writer.write_all(format!("{label}: ").as_bytes()).await?;
        self.writer.flush().await?;
        Ok(self.read_line().await?.unwrap_or_default())
    }

    async fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    async fn say(&mut self, text: &str) -> Result<()> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        Ok(())
    }
}

/// Menu number typed as `/N`.
fn menu_number(command: &str) -> Option<usize> {
    command.strip_prefix('/')?.parse().ok()
}

/// Flattens the answer markup into terminal text.
fn render_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let Some(end) = rest[start..].find('>') else {
            rest = &rest[start..];
            break;
        };
        let tag = &rest[start + 1..start + end];
        match tag {
            "li" => out.push_str("\n  - "),
            "/p" => out.push('\n'),
            _ => {}
        }
        rest = &rest[start + end + 1..];
    }
    out.push_str(rest);
    out.trim().to_string()
}
