mod api;
mod auth;
mod chat;
mod config;
mod drop_target;
mod logging;
mod preview;
mod render;
mod selection;
mod theme;
mod workflow;

use iced::{
    widget::{button, column, container, image, mouse_area, row, scrollable, stack, text, text_input, Column, Space},
    Element, Length, Task, Theme, Subscription, ContentFit, Size,
    time,
    keyboard::{self, Key},
    event::{self, Event as IcedEvent},
    alignment, Padding,
    window,
};
use serde_json::Value;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

use api::{AnalysisClient, AnalysisResult, ApiError};
use auth::{Identity, LocalSession};
use chat::{ChatTurn, Conversation};
use config::Config;
use drop_target::{DragEvent, DropTarget};
use render::ResultView;
use selection::{SelectedFile, SelectionError};
use workflow::{RequestTicket, Status, Workflow};

const BANNER_TIMEOUT: Duration = Duration::from_secs(5);

const LOADING_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const LOADING_MESSAGES: [&str; 6] = [
    "Comparing composition and structure...",
    "Reading the color palette...",
    "Looking closely at the brushwork...",
    "Searching for kindred artists...",
    "Gathering tips for your next piece...",
    "Writing up the artist's journey...",
];

fn main() -> iced::Result {
    if let Err(e) = logging::init() {
        eprintln!("Warning: {}", e);
    }

    let config = Config::load();
    let size = Size::new(config.window.width as f32, config.window.height as f32);
    let min_size = Size::new(config.window.min_width as f32, config.window.min_height as f32);

    iced::application("ArtAnalyze", App::update, App::view)
        .theme(App::theme)
        .subscription(App::subscription)
        .window(window::Settings {
            size,
            min_size: Some(min_size),
            position: window::Position::Centered,
            ..Default::default()
        })
        .run_with(move || App::new(config.clone()))
}

#[derive(Debug, Clone)]
enum Message {
    SignIn,
    SignOut,
    BrowseFile,
    FilePicked(Option<PathBuf>),
    Drag(DragEvent),
    FileLoaded(u64, Result<SelectedFile, SelectionError>),
    Analyze,
    AnalysisFinished(RequestTicket, Result<AnalysisResult, ApiError>),
    QuickMatch(RequestTicket, Result<String, ApiError>),
    StyleDetected(RequestTicket, Result<Value, ApiError>),
    Compare,
    ComparisonReceived(RequestTicket, Result<Value, ApiError>),
    Reset,
    QuestionChanged(String),
    AskQuestion,
    AnswerReceived(RequestTicket, Result<Value, ApiError>),
    HealthChecked(Result<Value, ApiError>),
    DismissBanner,
    BannerExpired(u64),
    Tick,
}

#[derive(Debug, Clone, PartialEq)]
enum BackendStatus {
    Checking,
    Online,
    Unreachable(String),
}

struct App {
    config: Config,
    client: AnalysisClient,
    identity: Box<dyn Identity>,
    workflow: Workflow,
    drop_target: DropTarget,
    result_view: Option<ResultView>,
    chat: Conversation,
    in_flight: Option<(RequestTicket, CancellationToken)>,
    /// Ticket of the analysis currently on screen, for follow-up calls.
    shown_ticket: Option<RequestTicket>,
    quick_match: Option<String>,
    style_prediction: Option<String>,
    comparing: bool,
    backend: BackendStatus,
    loading_frame: usize,
    /// Sequence number of the latest file load; older loads are dropped.
    load_seq: u64,
}

impl App {
    fn new(config: Config) -> (Self, Task<Message>) {
        let client = AnalysisClient::with_config(&config.backend, &config.upload);
        let identity: Box<dyn Identity> = Box::new(LocalSession::from_config(&config.auth));
        tracing::info!("Backend: {}", client.base_url());

        let app = App {
            workflow: Workflow::new(config.upload.max_bytes),
            client: client.clone(),
            identity,
            drop_target: DropTarget::new(),
            result_view: None,
            chat: Conversation::default(),
            in_flight: None,
            shown_ticket: None,
            quick_match: None,
            style_prediction: None,
            comparing: false,
            backend: BackendStatus::Checking,
            loading_frame: 0,
            load_seq: 0,
            config,
        };

        let health = Task::perform(
            async move { client.health().await },
            Message::HealthChecked,
        );

        (app, health)
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let banner_before = self.workflow.banner().map(|b| b.id);
        let task = self.handle(message);
        self.settle();

        match self.workflow.banner().map(|b| b.id) {
            Some(id) if Some(id) != banner_before => Task::batch([task, banner_timer(id)]),
            _ => task,
        }
    }

    fn handle(&mut self, message: Message) -> Task<Message> {
        if requires_session(&message) && !self.identity.is_authenticated() {
            tracing::debug!("Ignoring {:?} while signed out", message);
            return Task::none();
        }

        match message {
            Message::SignIn => {
                self.identity.sign_in();
                Task::none()
            }
            Message::SignOut => {
                self.identity.sign_out();
                self.clear_workflow();
                Task::none()
            }
            Message::BrowseFile => Task::perform(
                async {
                    rfd::AsyncFileDialog::new()
                        .set_title("Select your artwork")
                        .add_filter("Images", &["jpg", "jpeg", "png", "webp", "gif", "bmp"])
                        .pick_file()
                        .await
                        .map(|handle| handle.path().to_path_buf())
                },
                Message::FilePicked,
            ),
            Message::FilePicked(Some(path)) => self.load_file(path),
            Message::FilePicked(None) => Task::none(),
            Message::Drag(event) => match self.drop_target.handle(event, Instant::now()) {
                Some(path) => self.load_file(path),
                None => Task::none(),
            },
            Message::FileLoaded(seq, _) if seq != self.load_seq => {
                tracing::debug!("Dropping superseded file load {}", seq);
                Task::none()
            }
            Message::FileLoaded(_, Ok(file)) => {
                if self.workflow.select(file).is_ok() {
                    self.chat.clear();
                    self.quick_match = None;
                    self.style_prediction = None;
                }
                Task::none()
            }
            Message::FileLoaded(_, Err(e)) => {
                tracing::warn!("Could not load file: {}", e);
                self.workflow.raise(e.to_string());
                Task::none()
            }
            Message::Analyze => self.start_analysis(),
            Message::AnalysisFinished(ticket, outcome) => {
                let succeeded = outcome.is_ok();
                if !self.workflow.finish_analysis(ticket, outcome) || !succeeded {
                    return Task::none();
                }

                self.shown_ticket = Some(ticket);
                match self.workflow.file().cloned() {
                    Some(file) => {
                        let client = self.client.clone();
                        Task::perform(
                            async move { client.detect_art(&file).await },
                            move |outcome| Message::StyleDetected(ticket, outcome),
                        )
                    }
                    None => Task::none(),
                }
            }
            Message::QuickMatch(ticket, outcome) => {
                if self.workflow.in_flight() == Some(ticket) {
                    match outcome {
                        Ok(name) => self.quick_match = Some(name),
                        Err(e) => tracing::debug!("Quick match unavailable: {}", e),
                    }
                }
                Task::none()
            }
            Message::StyleDetected(ticket, outcome) => {
                if self.shown_ticket == Some(ticket) {
                    match outcome {
                        Ok(value) => self.style_prediction = chat::style_label(&value),
                        Err(e) => tracing::debug!("Style detection unavailable: {}", e),
                    }
                }
                Task::none()
            }
            Message::Compare => {
                let (Some(ticket), Some(file)) = (self.shown_ticket, self.workflow.file().cloned()) else {
                    return Task::none();
                };
                if self.comparing {
                    return Task::none();
                }

                self.comparing = true;
                let client = self.client.clone();
                let top_k = self.config.upload.top_k;
                Task::perform(
                    async move { client.compare_user_art(&file, top_k, true).await },
                    move |outcome| Message::ComparisonReceived(ticket, outcome),
                )
            }
            Message::ComparisonReceived(ticket, outcome) => {
                if self.shown_ticket != Some(ticket) {
                    return Task::none();
                }
                self.comparing = false;
                match outcome {
                    Ok(value) => self.chat.push(ChatTurn::assistant(chat::answer_text(&value))),
                    Err(e) => {
                        self.workflow.raise(e.to_string());
                    }
                }
                Task::none()
            }
            Message::Reset => {
                self.clear_workflow();
                Task::none()
            }
            Message::QuestionChanged(value) => {
                self.chat.set_draft(value);
                Task::none()
            }
            Message::AskQuestion => {
                let Some(ticket) = self.shown_ticket else {
                    return Task::none();
                };
                let style = self
                    .style_prediction
                    .as_deref()
                    .or_else(|| self.result_view.as_ref().and_then(|r| r.artist.as_deref()));
                let Some(question) = self.chat.ask(style, self.config.upload.top_k) else {
                    return Task::none();
                };

                let client = self.client.clone();
                Task::perform(
                    async move { client.ask_about_art(&question).await },
                    move |outcome| Message::AnswerReceived(ticket, outcome),
                )
            }
            Message::AnswerReceived(ticket, outcome) => {
                if self.shown_ticket == Some(ticket) {
                    self.chat.receive(outcome);
                } else {
                    tracing::debug!("Dropping answer for {:?}", ticket);
                }
                Task::none()
            }
            Message::HealthChecked(outcome) => {
                self.backend = match outcome {
                    Ok(_) => BackendStatus::Online,
                    Err(e) => {
                        tracing::warn!("Backend health check failed: {}", e);
                        BackendStatus::Unreachable(e.to_string())
                    }
                };
                Task::none()
            }
            Message::DismissBanner => {
                self.workflow.dismiss();
                Task::none()
            }
            Message::BannerExpired(id) => {
                self.workflow.dismiss_if(id);
                Task::none()
            }
            Message::Tick => {
                self.loading_frame = (self.loading_frame + 1) % (LOADING_FRAMES.len() * 10 * LOADING_MESSAGES.len());
                Task::none()
            }
        }
    }

    fn start_analysis(&mut self) -> Task<Message> {
        let Ok(job) = self.workflow.begin_analysis() else {
            return Task::none();
        };

        let ticket = job.ticket;
        let token = CancellationToken::new();
        self.in_flight = Some((ticket, token.clone()));
        self.quick_match = None;
        self.loading_frame = 0;

        let client = self.client.clone();
        let quick_client = self.client.clone();
        let quick_file = job.file.clone();
        let quick_token = token.clone();

        let analysis = Task::perform(
            async move { api::cancellable(token, client.analyze(&job.file)).await },
            move |outcome| Message::AnalysisFinished(ticket, outcome),
        );
        let quick = Task::perform(
            async move { api::cancellable(quick_token, quick_client.artist_name_only(&quick_file)).await },
            move |outcome| Message::QuickMatch(ticket, outcome),
        );

        Task::batch([analysis, quick])
    }

    fn load_file(&mut self, path: PathBuf) -> Task<Message> {
        let seq = self.next_load();
        let max_bytes = self.config.upload.max_bytes;
        Task::perform(selection::load(path, max_bytes), move |outcome| {
            Message::FileLoaded(seq, outcome)
        })
    }

    fn next_load(&mut self) -> u64 {
        self.load_seq += 1;
        self.load_seq
    }

    fn clear_workflow(&mut self) {
        self.workflow.reset();
        self.chat.clear();
        self.quick_match = None;
        self.style_prediction = None;
        self.comparing = false;
    }

    /// Keeps derived state in line with the workflow after every message.
    fn settle(&mut self) {
        let live = self.workflow.in_flight();
        if let Some((ticket, token)) = self.in_flight.take() {
            if live == Some(ticket) {
                self.in_flight = Some((ticket, token));
            } else {
                // No-op for a request that already finished.
                token.cancel();
            }
        }

        match self.workflow.result() {
            Some(result) => {
                if self.result_view.is_none() {
                    self.result_view = Some(render::layout(result));
                }
            }
            None => {
                self.result_view = None;
                self.shown_ticket = None;
                self.comparing = false;
            }
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        let timer = if self.workflow.status() == Status::Analyzing || self.chat.is_pending() {
            time::every(Duration::from_millis(80)).map(|_| Message::Tick)
        } else {
            Subscription::none()
        };

        let events = event::listen_with(|event, _status, _id| match event {
            IcedEvent::Window(window_event) => DragEvent::from_window(&window_event).map(Message::Drag),
            IcedEvent::Keyboard(keyboard::Event::KeyPressed {
                key: Key::Named(keyboard::key::Named::Escape),
                ..
            }) => Some(Message::DismissBanner),
            _ => None,
        });

        Subscription::batch([timer, events])
    }

    fn view(&self) -> Element<Message> {
        let body: Element<Message> = if self.identity.is_authenticated() {
            row![
                container(self.upload_panel()).width(Length::FillPortion(5)),
                container(self.results_panel()).width(Length::FillPortion(7)),
            ]
            .spacing(24)
            .height(Length::Fill)
            .into()
        } else {
            self.sign_in_card()
        };

        let page = column![
            self.app_bar(),
            container(
                column![self.hero(), body, self.footer()]
                    .spacing(32)
                    .max_width(1200),
            )
            .padding(Padding::from([32, 24]))
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Center),
        ];

        let mut layers = stack![container(page).width(Length::Fill).height(Length::Fill)];
        if let Some(banner) = self.workflow.banner() {
            layers = layers.push(
                container(
                    container(
                        row![
                            text(&banner.message).size(14).width(Length::Fill),
                            button(text("✕").size(14))
                                .on_press(Message::DismissBanner)
                                .style(theme::text_button),
                        ]
                        .spacing(12)
                        .align_y(alignment::Vertical::Center),
                    )
                    .padding(14)
                    .max_width(560)
                    .style(theme::error_banner),
                )
                .padding(24)
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(alignment::Horizontal::Center)
                .align_y(alignment::Vertical::Bottom),
            );
        }

        layers.into()
    }

    fn app_bar(&self) -> Element<Message> {
        let (status_text, status_color) = match &self.backend {
            BackendStatus::Checking => ("Checking backend...".to_string(), theme::TEXT_MUTED),
            BackendStatus::Online => ("Backend online".to_string(), theme::SUCCESS),
            BackendStatus::Unreachable(_) => ("Backend unreachable".to_string(), theme::DANGER),
        };

        let account: Element<Message> = if self.identity.is_authenticated() {
            row![
                text(self.identity.display_name().unwrap_or("Signed in").to_string())
                    .size(14)
                    .color(theme::TEXT_MUTED),
                button(text("Sign Out").size(14))
                    .on_press(Message::SignOut)
                    .padding([6, 12])
                    .style(theme::outlined_button),
            ]
            .spacing(12)
            .align_y(alignment::Vertical::Center)
            .into()
        } else {
            button(text("Sign In").size(14))
                .on_press(Message::SignIn)
                .padding([6, 12])
                .style(theme::outlined_button)
                .into()
        };

        container(
            row![
                text("ArtAnalyze").size(18).font(theme::SEMIBOLD),
                text(status_text).size(12).color(status_color),
                Space::with_width(Length::Fill),
                account,
            ]
            .spacing(16)
            .align_y(alignment::Vertical::Center),
        )
        .padding([12, 16])
        .width(Length::Fill)
        .style(theme::app_bar)
        .into()
    }

    fn hero(&self) -> Element<Message> {
        column![
            text("Analyze Your Artwork").size(40).font(theme::SEMIBOLD),
            text("Discover which artists have influenced your style and receive personalized insights about your work")
                .size(16)
                .color(theme::TEXT_MUTED),
        ]
        .spacing(12)
        .width(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .into()
    }

    fn footer(&self) -> Element<Message> {
        column![
            container(Space::with_height(1)).width(Length::Fill).style(theme::divider),
            text("© ArtAnalyze • AI-Powered Artwork Analysis")
                .size(14)
                .color(theme::TEXT_MUTED),
        ]
        .spacing(16)
        .width(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .into()
    }

    fn sign_in_card(&self) -> Element<Message> {
        container(
            container(
                column![
                    text("Sign In to Continue").size(28).font(theme::SEMIBOLD),
                    text("Our AI-powered tool helps you discover artistic influences in your work. Sign in to analyze your artwork.")
                        .size(16)
                        .color(theme::TEXT_MUTED),
                    button(text("Sign In").size(16))
                        .on_press(Message::SignIn)
                        .padding([12, 48])
                        .style(theme::primary_button),
                ]
                .spacing(24)
                .align_x(alignment::Horizontal::Center),
            )
            .padding(48)
            .max_width(600)
            .style(theme::paper),
        )
        .width(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .into()
    }

    fn upload_panel(&self) -> Element<Message> {
        let body: Element<Message> = match self.workflow.preview() {
            None => self.drop_zone(),
            Some(preview) => {
                let caption = self
                    .workflow
                    .file()
                    .map(|f| format!("{} • {} KB", f.name, (f.size() + 512) / 1024))
                    .unwrap_or_default();

                column![
                    row![
                        text("Image Preview").size(16).font(theme::SEMIBOLD),
                        Space::with_width(Length::Fill),
                        button(text("Clear").size(14))
                            .on_press(Message::Reset)
                            .style(theme::text_button),
                    ]
                    .align_y(alignment::Vertical::Center),
                    container(
                        image(preview.image().clone())
                            .content_fit(ContentFit::Contain)
                            .height(300),
                    )
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .align_x(alignment::Horizontal::Center)
                    .align_y(alignment::Vertical::Center),
                    text(caption).size(12).color(theme::TEXT_MUTED),
                ]
                .spacing(16)
                .height(Length::Fill)
                .into()
            }
        };

        let analyzing = self.workflow.status() == Status::Analyzing;
        let label = if analyzing {
            format!("{}  Analyzing...", LOADING_FRAMES[self.loading_frame % LOADING_FRAMES.len()])
        } else {
            "Analyze Artwork".to_string()
        };

        let analyze = button(
            text(label)
                .size(16)
                .width(Length::Fill)
                .align_x(alignment::Horizontal::Center),
        )
        .on_press_maybe(self.workflow.can_analyze().then_some(Message::Analyze))
        .padding(14)
        .width(Length::Fill)
        .style(theme::primary_button);

        panel(
            "Upload Artwork",
            "Upload an image of your artwork to analyze",
            column![container(body).height(Length::Fill), analyze]
                .spacing(24)
                .height(Length::Fill)
                .into(),
        )
    }

    fn drop_zone(&self) -> Element<Message> {
        let dragging = self.drop_target.is_dragging();
        let accent = if dragging { theme::PRIMARY } else { theme::TEXT };
        let limit_mb = self.config.upload.max_bytes / (1024 * 1024);

        mouse_area(
            container(
                column![
                    text("⇪").size(40).color(if dragging { theme::PRIMARY } else { theme::TEXT_MUTED }),
                    text(if dragging { "Drop to upload" } else { "Drag file here or click to browse" })
                        .size(16)
                        .font(theme::MEDIUM)
                        .color(accent),
                    text(format!("Supports JPG, PNG, WEBP (max {}MB)", limit_mb))
                        .size(14)
                        .color(theme::TEXT_MUTED),
                ]
                .spacing(8)
                .align_x(alignment::Horizontal::Center),
            )
            .padding(24)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .style(theme::drop_zone(dragging)),
        )
        .on_press(Message::BrowseFile)
        .into()
    }

    fn results_panel(&self) -> Element<Message> {
        let (title, subtitle) = if self.result_view.is_some() {
            ("Analysis Results", "AI-generated insights about your artwork")
        } else {
            ("How It Works", "Upload your artwork to get started")
        };

        let body: Element<Message> = match (&self.result_view, self.workflow.status()) {
            (_, Status::Analyzing) => self.loading_view(),
            (Some(result), _) if result.is_empty() => column![
                text("The analysis came back without any insights. Try another photo of the piece.")
                    .size(16)
                    .color(theme::TEXT_MUTED),
                self.follow_up_view(),
            ]
            .spacing(32)
            .into(),
            (Some(result), _) => scrollable(
                column![render::view(result), self.follow_up_view()]
                    .spacing(32)
                    .padding(Padding { right: 12.0, ..Padding::ZERO }),
            )
            .height(Length::Fill)
            .into(),
            (None, _) => how_it_works(),
        };

        panel(title, subtitle, body)
    }

    fn loading_view(&self) -> Element<Message> {
        let message_idx = (self.loading_frame / 10) % LOADING_MESSAGES.len();
        let spinner_idx = self.loading_frame % LOADING_FRAMES.len();

        let mut content = column![
            text(LOADING_FRAMES[spinner_idx]).size(32),
            text(LOADING_MESSAGES[message_idx]).size(15),
        ]
        .spacing(10)
        .align_x(alignment::Horizontal::Center);

        if let Some(name) = &self.quick_match {
            content = content.push(
                text(format!("Early match: {}", name))
                    .size(14)
                    .color(theme::TEXT_MUTED),
            );
        }

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .into()
    }

    fn follow_up_view(&self) -> Element<Message> {
        let transcript = self
            .chat
            .turns()
            .iter()
            .fold(Column::new().spacing(8), |col, turn| col.push(chat::bubble(turn)));

        let mut input = text_input("Ask a question about your artwork...", self.chat.draft()).padding(12);
        if !self.chat.is_pending() {
            input = input
                .on_input(Message::QuestionChanged)
                .on_submit(Message::AskQuestion);
        }

        let compare = button(text(if self.comparing { "Comparing..." } else { "Compare with artists" }).size(14))
            .on_press_maybe((!self.comparing).then_some(Message::Compare))
            .padding([6, 12])
            .style(theme::outlined_button);

        let mut header = row![
            text("Ask About This Artwork").size(16).font(theme::SEMIBOLD),
            Space::with_width(Length::Fill),
            compare,
        ]
        .spacing(12)
        .align_y(alignment::Vertical::Center);
        if let Some(style) = &self.style_prediction {
            header = header.push(text(format!("Style: {}", style)).size(12).color(theme::TEXT_MUTED));
        }

        let mut content = column![header, transcript].spacing(16);
        if self.chat.is_pending() {
            let spinner = LOADING_FRAMES[self.loading_frame % LOADING_FRAMES.len()];
            content = content.push(text(format!("{} Thinking...", spinner)).size(14).color(theme::TEXT_MUTED));
        }

        content.push(input).into()
    }

    fn theme(&self) -> Theme {
        theme::theme()
    }
}

/// Messages that only make sense behind the sign-in gate.
fn requires_session(message: &Message) -> bool {
    !matches!(
        message,
        Message::SignIn
            | Message::HealthChecked(_)
            | Message::DismissBanner
            | Message::BannerExpired(_)
            | Message::Tick
            | Message::AnalysisFinished(..)
            | Message::QuickMatch(..)
    )
}

fn banner_timer(id: u64) -> Task<Message> {
    Task::perform(
        async move { tokio::time::sleep(BANNER_TIMEOUT).await },
        move |_| Message::BannerExpired(id),
    )
}

fn panel<'a>(title: &'a str, subtitle: &'a str, body: Element<'a, Message>) -> Element<'a, Message> {
    container(column![
        container(
            column![
                text(title).size(20).font(theme::SEMIBOLD),
                text(subtitle).size(14).color(theme::TEXT_MUTED),
            ]
            .spacing(6),
        )
        .padding(24)
        .width(Length::Fill),
        container(Space::with_height(1)).width(Length::Fill).style(theme::divider),
        container(body).padding(24).width(Length::Fill).height(Length::Fill),
    ])
    .width(Length::Fill)
    .height(Length::Fill)
    .style(theme::paper)
    .into()
}

fn how_it_works<'a>() -> Element<'a, Message> {
    let bullet = |line: &'a str| {
        row![
            text("•").size(16).color(theme::PRIMARY),
            text(line).size(16).color(theme::TEXT_MUTED),
        ]
        .spacing(12)
    };

    column![
        text("Our AI system analyzes your artwork by:").size(16),
        column![
            bullet("Comparing composition and structure"),
            bullet("Identifying color palette and use of light"),
            bullet("Detecting brush techniques and textures"),
            bullet("Recognizing subject matter and style"),
        ]
        .spacing(8),
        text("The system then identifies the most similar artist in our database and provides insights about your work.")
            .size(16)
            .color(theme::TEXT_MUTED),
        container(
            column![
                text("Tips for best results:").size(14).font(theme::MEDIUM),
                text("Use a clear, well-lit photo of your artwork without frames or glare, and ensure the entire piece is visible.")
                    .size(14)
                    .color(theme::TEXT_MUTED),
            ]
            .spacing(4),
        )
        .padding(16)
        .width(Length::Fill)
        .style(theme::info_box),
    ]
    .spacing(24)
    .into()
}
