use chrono::{DateTime, Duration, Local};
use eframe::{egui, App, CreationContext, Frame};
use egui::{Align, Color32, Layout, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::models::{ValidationError, Workout, WorkoutForm, WorkoutType, MAX_INTENSITY};
use crate::persistence::{PersistenceError, WorkoutFile};
use crate::store::RecordStore;

pub const ADDED_MESSAGE: &str = "Trening dodany!";
pub const INVALID_MESSAGE: &str = "Wypełnij dobrze wszystkie pola!";
pub const SAVE_FAILED_MESSAGE: &str = "Nie udało się zapisać treningów";
pub const LOAD_FAILED_MESSAGE: &str = "Nie udało się wczytać treningów";

const NOTICE_SECONDS: i64 = 2;
const ROW_HEIGHT: f32 = 36.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Failure,
}

/// Short-lived message at the bottom of the window.
#[derive(Clone, Debug)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
    shown_at: DateTime<Local>,
}

impl Notice {
    fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Notice {
            message: message.into(),
            kind,
            shown_at: Local::now(),
        }
    }

    pub fn is_expired(&self, now: DateTime<Local>) -> bool {
        now - self.shown_at >= Duration::seconds(NOTICE_SECONDS)
    }
}

/// Everything the window edits: the loaded workouts, where they are saved, and the
/// current notice. Built once at startup and owned by [`FitnessApp`].
pub struct WorkoutLog {
    store: RecordStore,
    file: WorkoutFile,
    notice: Option<Notice>,
}

impl WorkoutLog {
    /// Loads the workout file. Unreadable data never stops the app: it starts empty
    /// and says why.
    pub fn open(file: WorkoutFile) -> Self {
        let mut log = WorkoutLog {
            store: RecordStore::default(),
            file,
            notice: None,
        };

        match log.file.load() {
            Ok(workouts) => {
                tracing::info!(
                    path = %log.file.path().display(),
                    count = workouts.len(),
                    "Workouts loaded"
                );
                log.store = RecordStore::from_records(workouts);
            }
            Err(e @ PersistenceError::Deserialization { .. }) => {
                tracing::warn!(error = %e, "Workout file is corrupt, starting with an empty list");
                let message = match log.file.quarantine() {
                    Ok(backup) => format!("Plik z treningami był uszkodzony, kopia: {}", backup.display()),
                    Err(e) => {
                        tracing::error!(error = %e, "Could not move corrupt workout file aside");
                        LOAD_FAILED_MESSAGE.to_string()
                    }
                };
                log.notify(NoticeKind::Failure, message);
            }
            Err(e) => {
                tracing::error!(error = %e, "Could not read workout file, starting with an empty list");
                log.notify(NoticeKind::Failure, LOAD_FAILED_MESSAGE);
            }
        }

        log
    }

    pub fn workouts(&self) -> &[Workout] {
        self.store.all()
    }

    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Validates the form, then appends and saves. An invalid form changes nothing.
    /// A failed save keeps the workout in memory and reports it.
    pub fn submit(&mut self, form: &WorkoutForm) -> Result<(), ValidationError> {
        let workout = match form.validate() {
            Ok(workout) => workout,
            Err(e) => {
                tracing::debug!(reason = %e, "Rejected workout input");
                self.notify(NoticeKind::Failure, INVALID_MESSAGE);
                return Err(e);
            }
        };

        tracing::info!(kind = %workout.kind, distance = workout.distance, "Adding workout");
        self.store.add(workout);

        match self.file.save(self.store.all()) {
            Ok(()) => self.notify(NoticeKind::Success, ADDED_MESSAGE),
            Err(e) => {
                tracing::error!(error = %e, "Could not save workouts");
                self.notify(NoticeKind::Failure, SAVE_FAILED_MESSAGE);
            }
        }
        Ok(())
    }

    fn notify(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.notice = Some(Notice::new(kind, message));
    }

    fn expire_notice(&mut self, now: DateTime<Local>) {
        if self.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notice = None;
        }
    }
}

pub struct FitnessApp {
    log: WorkoutLog,
    form: WorkoutForm,
    selected_workout: Option<usize>,
    seen_revision: u64,
}

impl FitnessApp {
    pub fn new(cc: &CreationContext, log: WorkoutLog) -> Self {
        cc.egui_ctx.style_mut(|style| {
            style.text_styles.insert(
                egui::TextStyle::Body,
                egui::FontId::new(18.0, egui::FontFamily::Proportional),
            );
            style.text_styles.insert(
                egui::TextStyle::Button,
                egui::FontId::new(18.0, egui::FontFamily::Proportional),
            );
            style.text_styles.insert(
                egui::TextStyle::Heading,
                egui::FontId::new(26.0, egui::FontFamily::Proportional),
            );
        });

        let seen_revision = log.revision();
        FitnessApp {
            log,
            form: WorkoutForm::default(),
            selected_workout: None,
            seen_revision,
        }
    }
}

impl App for FitnessApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.log.expire_notice(Local::now());

        if let Some(notice) = self.log.notice() {
            let color = match notice.kind {
                NoticeKind::Success => Color32::from_rgb(80, 160, 90),
                NoticeKind::Failure => Color32::from_rgb(200, 70, 70),
            };
            egui::TopBottomPanel::bottom("notice").show(ctx, |ui| {
                ui.with_layout(Layout::top_down(Align::Center), |ui| {
                    ui.label(RichText::new(&notice.message).color(color).strong());
                });
            });
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Dziennik treningów");
            ui.add_space(10.0);
            self.show_form(ui);
            ui.add_space(10.0);
            ui.separator();

            let scroll_to = if self.log.revision() != self.seen_revision {
                self.seen_revision = self.log.revision();
                self.log.workouts().len().checked_sub(1)
            } else {
                None
            };
            if let Some(idx) = show_workout_list(ui, self.log.workouts(), scroll_to) {
                self.selected_workout = Some(idx);
            }
        });

        self.show_details(ctx);
    }
}

impl FitnessApp {
    fn show_form(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            for kind in WorkoutType::ALL {
                ui.radio_value(&mut self.form.kind, Some(kind), kind.label());
            }
        });

        egui::Grid::new("workout_form").num_columns(2).spacing([12.0, 6.0]).show(ui, |ui| {
            ui.label("Dystans (km)");
            ui.text_edit_singleline(&mut self.form.distance);
            ui.end_row();

            ui.label("Czas trwania (min)");
            ui.text_edit_singleline(&mut self.form.duration);
            ui.end_row();

            ui.label("Kalorie");
            ui.text_edit_singleline(&mut self.form.calories);
            ui.end_row();

            ui.label("Intensywność");
            ui.add(egui::Slider::new(&mut self.form.intensity, 0..=MAX_INTENSITY));
            ui.end_row();
        });

        ui.add_space(6.0);
        if ui.button("Dodaj trening").clicked() && self.log.submit(&self.form).is_ok() {
            self.form.clear_inputs();
        }
    }

    fn show_details(&mut self, ctx: &egui::Context) {
        let Some(workout) = self.selected_workout.and_then(|idx| self.log.workouts().get(idx)) else {
            return;
        };

        let mut close = false;
        let response = egui::Modal::new(egui::Id::new("workout_details")).show(ctx, |ui| {
            ui.heading(workout.details_title());
            ui.add_space(8.0);
            ui.label(workout.details());
            ui.add_space(8.0);
            ui.with_layout(Layout::right_to_left(Align::Min), |ui| {
                if ui.button("OK").clicked() {
                    close = true;
                }
            });
        });

        if close || response.should_close() {
            self.selected_workout = None;
        }
    }
}

/// Draws one row per workout. Returns the row whose details button was pressed.
fn show_workout_list(ui: &mut Ui, workouts: &[Workout], scroll_to: Option<usize>) -> Option<usize> {
    if workouts.is_empty() {
        ui.label(RichText::new("Brak treningów").italics());
        return None;
    }

    let mut opened = None;
    let height = ui.available_height();
    let mut table = TableBuilder::new(ui)
        .striped(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::auto().at_least(160.0))
        .column(Column::remainder().at_least(160.0))
        .column(Column::auto())
        .max_scroll_height(height);
    if let Some(row) = scroll_to {
        table = table.scroll_to_row(row, Some(Align::BOTTOM));
    }

    table.body(|body| {
        body.rows(ROW_HEIGHT, workouts.len(), |mut row| {
            let idx = row.index();
            let workout = &workouts[idx];
            row.col(|ui| {
                ui.label(RichText::new(workout.kind.label()).strong());
            });
            row.col(|ui| {
                ui.label(workout.summary());
            });
            row.col(|ui| {
                if ui.button("Szczegóły").clicked() {
                    opened = Some(idx);
                }
            });
        });
    });
    opened
}
