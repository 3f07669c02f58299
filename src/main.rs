use iced::widget::image::Handle;
use iced::widget::{button, checkbox, column, container, mouse_area, row, text, Image};
use iced::{keyboard, mouse};
use iced::{Alignment, ContentFit, Element, Length, Subscription, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;

mod files;
mod logging;
mod state;
mod ui;

use state::config::ConfigStore;
use state::data::{MediaKind, Notice, Severity};
use state::navigator::{NavError, Navigator};
use ui::keybindings::{self, Action};
use ui::preview::{self, Preview};

/// Main application state
struct MediaOrganizer {
    /// Folder and media cursors plus the persisted settings
    navigator: Navigator,
    /// What the preview pane shows for the current media file
    preview: Preview,
    /// Status line text
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked "Browse..." to choose the root folder
    BrowseRoot,
    RecursiveToggled(bool),
    SkipConfirmationToggled(bool),
    /// User clicked "Scan"
    Rescan,
    /// Navigation button or keyboard shortcut
    Nav(Action),
    /// User clicked the preview pane
    DisplayClicked,
    /// Background image decode finished
    PreviewLoaded(PathBuf, Result<Handle, String>),
}

impl MediaOrganizer {
    fn new() -> (Self, Task<Message>) {
        let config = ConfigStore::open_default();
        let navigator = Navigator::new(config);

        let status = match navigator.settings().root_folder() {
            Some(root) => format!("Ready. Press Scan to load {}.", root.display()),
            None => "Ready. Choose a media folder to begin.".to_string(),
        };
        tracing::info!("Media Organizer started");

        (
            MediaOrganizer {
                navigator,
                preview: Preview::Empty,
                status,
            },
            Task::none(),
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::BrowseRoot => {
                let folder = FileDialog::new()
                    .set_title("Select Media Folder")
                    .pick_folder();

                if let Some(folder) = folder {
                    self.status = format!("Selected {}. Press Scan to load it.", folder.display());
                    self.navigator.select_root(folder);
                }
                Task::none()
            }
            Message::RecursiveToggled(recursive) => {
                self.navigator.set_recursive(recursive);
                Task::none()
            }
            Message::SkipConfirmationToggled(skip) => {
                self.navigator.set_skip_confirmation(skip);
                Task::none()
            }
            Message::Rescan => {
                let recursive = self.navigator.settings().recursive;
                match self.navigator.rescan(recursive) {
                    Ok(0) => self.notify(Notice::info("No folders found")),
                    Ok(count) => self.notify(Notice::info(format!("Found {} folders", count))),
                    Err(err) => self.report(err),
                }
                self.refresh_preview()
            }
            Message::Nav(action) => self.perform(action),
            Message::DisplayClicked => {
                if self.navigator.classify_current() == MediaKind::Video {
                    self.perform(Action::PlayMedia)
                } else {
                    Task::none()
                }
            }
            Message::PreviewLoaded(path, result) => {
                if !self.preview.resolve(&path, result) {
                    tracing::debug!("Dropped stale preview for {}", path.display());
                }
                Task::none()
            }
        }
    }

    /// Run a navigation action, asking for confirmation before deletions
    fn perform(&mut self, action: Action) -> Task<Message> {
        match action {
            Action::PrevFolder => {
                if self.navigator.prev_folder() {
                    return self.refresh_preview();
                }
            }
            Action::NextFolder => {
                if self.navigator.next_folder() {
                    return self.refresh_preview();
                }
            }
            Action::DeleteFolder => {
                let Some(folder) = self.navigator.snapshot().folder else {
                    return Task::none();
                };
                if self.navigator.needs_confirmation()
                    && !ui::dialogs::confirm(
                        "Delete Folder",
                        &format!("Delete folder \"{}\" and all contents?", folder.name),
                    )
                {
                    return Task::none();
                }

                match self.navigator.delete_current_folder() {
                    Ok(Some(name)) => {
                        self.notify(Notice::info(format!("Deleted folder: {}", name)));
                        return self.refresh_preview();
                    }
                    Ok(None) => {}
                    Err(err) => self.report(err),
                }
            }
            Action::PrevMedia => {
                if self.navigator.prev_media() {
                    return self.refresh_preview();
                }
            }
            Action::NextMedia => {
                if self.navigator.next_media() {
                    return self.refresh_preview();
                }
            }
            Action::DeleteMedia => {
                let Some(media) = self.navigator.snapshot().media else {
                    return Task::none();
                };
                if self.navigator.needs_confirmation()
                    && !ui::dialogs::confirm("Delete Media", &format!("Delete \"{}\"?", media.name))
                {
                    return Task::none();
                }

                match self.navigator.delete_current_media() {
                    Ok(Some(name)) => {
                        self.notify(Notice::info(format!("Deleted: {}", name)));
                        return self.refresh_preview();
                    }
                    Ok(None) => {}
                    Err(err) => self.report(err),
                }
            }
            Action::PlayMedia => {
                if self.navigator.classify_current() == MediaKind::Video {
                    if let Err(err) = self.navigator.play_current_media() {
                        self.report(err);
                    }
                }
            }
        }

        Task::none()
    }

    /// Point the preview pane at the current media, decoding images in the
    /// background
    fn refresh_preview(&mut self) -> Task<Message> {
        let snapshot = self.navigator.snapshot();
        self.preview = Preview::begin(snapshot.media.as_ref());

        match self.preview.pending_path() {
            Some(path) => {
                let path = path.to_path_buf();
                Task::perform(preview::load_preview(path.clone()), move |result| {
                    Message::PreviewLoaded(path.clone(), result)
                })
            }
            None => Task::none(),
        }
    }

    /// The single channel every user-facing message goes through
    fn notify(&mut self, notice: Notice) {
        match notice.severity {
            Severity::Info => {
                tracing::info!("{}", notice.text);
            }
            Severity::Critical => {
                tracing::error!("{}", notice.text);
                ui::dialogs::show_error(&notice.text);
            }
        }
        self.status = notice.text;
    }

    fn report(&mut self, err: NavError) {
        if let Some(source) = std::error::Error::source(&err) {
            tracing::error!("{}: {}", err, source);
        }
        self.notify(Notice::critical(err.to_string()));
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let settings = self.navigator.settings();
        let snapshot = self.navigator.snapshot();

        let root_label = settings
            .root_folder()
            .map(|root| root.display().to_string())
            .unwrap_or_else(|| "No folder selected".to_string());

        let root_row = row![
            text(root_label).width(Length::Fill),
            button("Browse...").on_press(Message::BrowseRoot),
            button("Scan").on_press(Message::Rescan),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let options_row = row![
            checkbox("Recursive scan", settings.recursive).on_toggle(Message::RecursiveToggled),
            checkbox("Skip delete confirmation", settings.skip_delete_confirmation)
                .on_toggle(Message::SkipConfirmationToggled),
        ]
        .spacing(20);

        let folder_row = row![
            button("< Folder")
                .on_press_maybe(snapshot.can_prev_folder.then_some(Message::Nav(Action::PrevFolder))),
            container(text(snapshot.folder_label()).size(18)).center_x(Length::Fill),
            button("Folder >")
                .on_press_maybe(snapshot.can_next_folder.then_some(Message::Nav(Action::NextFolder))),
            button("Delete Folder").on_press_maybe(
                snapshot
                    .can_delete_folder
                    .then_some(Message::Nav(Action::DeleteFolder))
            ),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let media_row = row![
            button("<")
                .on_press_maybe(snapshot.can_prev_media.then_some(Message::Nav(Action::PrevMedia))),
            container(text(snapshot.media_label())).center_x(Length::Fill),
            button(">")
                .on_press_maybe(snapshot.can_next_media.then_some(Message::Nav(Action::NextMedia))),
            button("Play")
                .on_press_maybe(snapshot.can_play.then_some(Message::Nav(Action::PlayMedia))),
            button("Delete")
                .on_press_maybe(snapshot.can_delete_media.then_some(Message::Nav(Action::DeleteMedia))),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let content = column![
            root_row,
            options_row,
            folder_row,
            self.preview_pane(snapshot.can_play),
            media_row,
            text(&self.status).size(14),
        ]
        .spacing(12)
        .padding(20);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn preview_pane(&self, playable: bool) -> Element<Message> {
        let inner: Element<Message> = match &self.preview {
            Preview::Image { handle, .. } => Image::<Handle>::new(handle.clone())
                .content_fit(ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            other => text(other.caption()).size(18).into(),
        };

        let framed = container(inner)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill);

        let area = mouse_area(framed).on_press(Message::DisplayClicked);
        if playable {
            area.interaction(mouse::Interaction::Pointer).into()
        } else {
            area.into()
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        keyboard::on_key_press(|key, modifiers| {
            keybindings::action_for(&key, modifiers).map(Message::Nav)
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    logging::init();

    iced::application("Media Organizer", MediaOrganizer::update, MediaOrganizer::view)
        .theme(MediaOrganizer::theme)
        .subscription(MediaOrganizer::subscription)
        .centered()
        .run_with(MediaOrganizer::new)
}
