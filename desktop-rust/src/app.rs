use std::sync::mpsc::{self, Receiver};

use eframe::egui::{self, Color32, RichText};
use eframe::egui::{FontData, FontDefinitions, FontFamily};

use excel_keyword_search::error::SearchError;
use excel_keyword_search::export;
use excel_keyword_search::scanner::scan_directory_with_progress;
use excel_keyword_search::session::SearchSession;
use excel_search_common::{language_name, MessageId, SearchResults};

use crate::io::{pick_csv_save_path, pick_folder};
use crate::model::{NoticeLevel, ViewState};

pub struct DesktopApp {
    session: SearchSession,
    view: ViewState,
    search_rx: Option<Receiver<UiMessage>>,
    title: String,
}

enum UiMessage {
    Progress { file_name: String },
    SearchDone { results: SearchResults },
}

impl DesktopApp {
    pub fn new(session: SearchSession) -> Self {
        let mut view = ViewState::default();
        if let Some(path) = session.last_search_path() {
            view.form.path = path.to_string();
        }
        view.status = session.status_line();
        Self {
            session,
            view,
            search_rx: None,
            title: String::new(),
        }
    }

    fn t(&self, id: MessageId) -> String {
        self.session.translator().text(id)
    }

    fn report_error(&mut self, err: &SearchError) {
        let title = self.t(MessageId::Error);
        let message = self.session.error_message(err);
        self.view.error(&title, &message);
    }

    fn report_info(&mut self, id: MessageId) {
        let title = self.t(MessageId::Info);
        let message = self.t(id);
        self.view.info(&title, &message);
    }

    fn browse_directory(&mut self) {
        if let Some(path) = pick_folder(&self.view.form.path) {
            let path = path.to_string_lossy().to_string();
            self.session.remember_search_path(&path);
            self.view.form.path = path;
        }
    }

    fn start_search(&mut self) {
        if self.view.searching {
            return;
        }
        let (path, keywords) = match self
            .session
            .prepare_search(&self.view.form.path, &self.view.form.keywords)
        {
            Ok(input) => input,
            Err(err) => {
                self.report_error(&err);
                return;
            }
        };

        let (tx, rx) = mpsc::channel();
        self.search_rx = Some(rx);
        self.session.clear_results();
        self.view.searching = true;
        self.view.notice = None;
        self.view.clear_selection();

        std::thread::spawn(move || {
            let results = scan_directory_with_progress(&path, &keywords, |file| {
                let file_name = file
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                let _ = tx.send(UiMessage::Progress { file_name });
            });
            let _ = tx.send(UiMessage::SearchDone { results });
        });
    }

    fn export_csv(&mut self) {
        if self.session.table().is_empty() {
            self.report_info(MessageId::NoResults);
            return;
        }
        let Some(path) = pick_csv_save_path(&export::default_file_name()) else {
            return;
        };
        match self.session.export_csv(&path) {
            Ok(()) => {
                let message = self
                    .session
                    .translator()
                    .t(MessageId::SavedTo, &[("filepath", &path.display())]);
                let title = self.t(MessageId::Success);
                self.view.info(&title, &message);
            }
            Err(err) => self.report_error(&err),
        }
    }

    fn open_selected(&mut self) {
        let Some(index) = self.view.selected_row else {
            self.report_info(MessageId::SelectRecord);
            return;
        };
        if let Err(err) = self.session.open_row(index) {
            self.report_error(&err);
        }
    }

    fn change_language(&mut self, tag: &str) {
        match self.session.change_language(tag) {
            Ok(true) => {
                if !self.view.searching {
                    self.view.status = self.session.status_line();
                }
            }
            Ok(false) => tracing::warn!(language = tag, "language not available"),
            Err(err) => tracing::warn!(error = %err, "failed to save language"),
        }
    }

    fn poll_messages(&mut self) {
        let Some(rx) = &self.search_rx else {
            return;
        };
        let mut done = None;
        while let Ok(msg) = rx.try_recv() {
            match msg {
                UiMessage::Progress { file_name } => {
                    self.view.status = self
                        .session
                        .translator()
                        .t(MessageId::Searching, &[("filename", &file_name)]);
                }
                UiMessage::SearchDone { results } => done = Some(results),
            }
        }
        if let Some(results) = done {
            self.session.set_results(results);
            self.view.status = self.session.status_line();
            self.view.searching = false;
            self.search_rx = None;
        }
    }

    fn sync_title(&mut self, ctx: &egui::Context) {
        let title = self.t(MessageId::AppTitle);
        if title != self.title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.title = title;
        }
    }

    fn save_window_size(&mut self, ctx: &egui::Context) {
        let size = ctx.screen_rect().size();
        if let Err(err) = self.session.remember_window_size(size.x, size.y) {
            tracing::warn!(error = %err, "failed to save window size");
        }
    }

    fn render_inputs(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(self.t(MessageId::SearchPath));
            ui.add(egui::TextEdit::singleline(&mut self.view.form.path).desired_width(480.0));
            if ui.button(self.t(MessageId::Browse)).clicked() {
                self.browse_directory();
            }
        });

        ui.horizontal(|ui| {
            ui.label(self.t(MessageId::Keywords));
            let response = ui.add(egui::TextEdit::singleline(&mut self.view.form.keywords).desired_width(400.0));
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                self.start_search();
            }
        });

        ui.horizontal(|ui| {
            if ui
                .add_enabled(!self.view.searching, egui::Button::new(self.t(MessageId::SearchExcel)))
                .clicked()
            {
                self.start_search();
            }
            if ui.button(self.t(MessageId::ExportCsv)).clicked() {
                self.export_csv();
            }
            if ui.button(self.t(MessageId::OpenFile)).clicked() {
                self.open_selected();
            }
            if self.view.searching {
                ui.spinner();
            }
        });
    }

    fn render_table(&mut self, ui: &mut egui::Ui) {
        let headers = self.session.table().headers(self.session.translator());
        let columns = self.session.table().columns();
        let mut clicked = None;

        egui::ScrollArea::both().auto_shrink([false, false]).show(ui, |ui| {
            egui::Grid::new("results")
                .striped(true)
                .num_columns(columns.len())
                .show(ui, |ui| {
                    for (column, header) in columns.iter().zip(&headers) {
                        ui.add_sized(
                            [column.width(), 18.0],
                            egui::Label::new(RichText::new(header).strong()),
                        );
                    }
                    ui.end_row();

                    for (index, row) in self.session.table().rows.iter().enumerate() {
                        let selected = self.view.selected_row == Some(index);
                        for column in columns {
                            let response = ui.add_sized(
                                [column.width(), 18.0],
                                egui::SelectableLabel::new(selected, row.value(*column)),
                            );
                            if response.clicked() {
                                clicked = Some((index, false));
                            }
                            if response.double_clicked() {
                                clicked = Some((index, true));
                            }
                        }
                        ui.end_row();
                    }
                });
        });

        if let Some((index, open)) = clicked {
            self.view.select(index);
            if open {
                self.open_selected();
            }
        }
    }
}

pub fn configure_fonts(ctx: &egui::Context) {
    let mut fonts = FontDefinitions::default();
    let candidates = [
        r"C:\Windows\Fonts\msyh.ttc",
        r"C:\Windows\Fonts\simsun.ttc",
        "/System/Library/Fonts/PingFang.ttc",
        "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
        "/usr/share/fonts/truetype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    ];

    for path in candidates {
        if let Ok(data) = std::fs::read(path) {
            fonts.font_data.insert("cjk_fallback".to_string(), FontData::from_owned(data));
            fonts.families
                .entry(FontFamily::Proportional)
                .or_default()
                .push("cjk_fallback".to_string());
            fonts.families
                .entry(FontFamily::Monospace)
                .or_default()
                .push("cjk_fallback".to_string());
            ctx.set_fonts(fonts);
            return;
        }
    }
    tracing::debug!("no CJK font found");
}

impl eframe::App for DesktopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.view.searching {
            ctx.request_repaint();
        }
        self.poll_messages();
        self.sync_title(ctx);

        if ctx.input(|i| i.viewport().close_requested()) {
            self.save_window_size(ctx);
        }

        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button(self.t(MessageId::Language), |ui| {
                    let current = self.session.translator().language().to_string();
                    for tag in self.session.translator().available_languages() {
                        let label = language_name(&tag).to_string();
                        if ui.radio(tag == current, label).clicked() {
                            self.change_language(&tag);
                            ui.close_menu();
                        }
                    }
                });
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(RichText::new(&self.view.status).color(Color32::from_gray(170)));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_inputs(ui);
            if let Some((level, message)) = &self.view.notice {
                let color = match level {
                    NoticeLevel::Info => Color32::from_rgb(80, 160, 80),
                    NoticeLevel::Error => Color32::from_rgb(200, 70, 70),
                };
                ui.label(RichText::new(message).color(color));
            }
            ui.separator();
            self.render_table(ui);
        });
    }
}

/// 起動時のウィンドウサイズ
pub fn initial_window_size(session: &SearchSession) -> [f32; 2] {
    let (width, height) = session.config().window_size();
    [width, height]
}
