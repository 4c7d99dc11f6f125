use std::time::{Duration, Instant};

use arboard::Clipboard;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use registration_core::{
    error::TRANSPORT_FALLBACK_MESSAGE, ErrorKey, FormController, FormField, Notice, NoticeKind,
    Phase, SubmissionResult, TermsDisclosure,
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::terms::show_terms_modal;

const NOTICE_LIFETIME: Duration = Duration::from_secs(4);
const CARD_MAX_WIDTH: f32 = 720.0;

#[derive(Debug, Clone)]
struct ToastNotice {
    notice: Notice,
    shown_at: Instant,
}

pub struct RegistrationApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    form: FormController,
    terms: TermsDisclosure,

    toasts: Vec<ToastNotice>,
    status: String,
    backend_error: Option<UiError>,
}

impl RegistrationApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            form: FormController::new(),
            terms: TermsDisclosure::default(),
            toasts: Vec::new(),
            status: "Iniciando...".to_string(),
            backend_error: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::SubmissionFinished(result) => {
                    self.form.complete_submit(result);
                }
                UiEvent::Error(err) => {
                    tracing::error!(context = ?err.context(), "{}", err.message());
                    self.status = err.message().to_string();
                    if err.is_fatal_to_backend() && self.form.phase() == Phase::Submitting {
                        self.form.complete_submit(SubmissionResult::Failure {
                            message: TRANSPORT_FALLBACK_MESSAGE.to_string(),
                        });
                    }
                    self.backend_error = Some(err);
                }
            }
        }
        self.collect_notices();
    }

    fn collect_notices(&mut self) {
        let now = Instant::now();
        self.toasts.extend(
            self.form
                .drain_notices()
                .into_iter()
                .map(|notice| ToastNotice {
                    notice,
                    shown_at: now,
                }),
        );
        self.toasts
            .retain(|toast| now.duration_since(toast.shown_at) < NOTICE_LIFETIME);
    }

    fn try_submit(&mut self) {
        let Some(input) = self.form.begin_submit() else {
            self.collect_notices();
            return;
        };

        if let Err(err) = dispatch_backend_command(&self.cmd_tx, BackendCommand::Submit { input })
        {
            tracing::warn!("{}", err.message());
            self.status = err.message().to_string();
            self.form.complete_submit(SubmissionResult::Failure {
                message: TRANSPORT_FALLBACK_MESSAGE.to_string(),
            });
        }
        self.collect_notices();
    }

    fn copy_code_to_clipboard(&mut self, code: &str) {
        match Clipboard::new().and_then(|mut clipboard| clipboard.set_text(code.to_string())) {
            Ok(()) => self.status = "Código copiado al portapapeles".to_string(),
            Err(err) => {
                tracing::warn!("clipboard unavailable: {err}");
                self.status = "No se pudo copiar el código".to_string();
            }
        }
    }

    fn show_header(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("🎟").size(28.0));
            ui.vertical(|ui| {
                ui.heading("Registro para Sorteo");
                ui.weak("Complete el formulario para participar en nuestro increíble sorteo");
            });
        });
    }

    fn show_backend_banner(&mut self, ui: &mut egui::Ui) {
        let Some(err) = self.backend_error.clone() else {
            return;
        };
        egui::Frame::NONE
            .fill(egui::Color32::from_rgb(111, 53, 53))
            .stroke(egui::Stroke::new(
                1.0,
                egui::Color32::from_rgb(175, 96, 96),
            ))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(egui::RichText::new(err.message()).color(egui::Color32::WHITE));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Cerrar").clicked() {
                            self.backend_error = None;
                        }
                    });
                });
            });
        ui.add_space(8.0);
    }

    fn show_field(&mut self, ui: &mut egui::Ui, field: FormField) {
        ui.label(egui::RichText::new(field.label()).strong());

        let mut value = self.form.value(field).to_string();
        let edit = if field.is_multiline() {
            egui::TextEdit::multiline(&mut value).desired_rows(3)
        } else {
            egui::TextEdit::singleline(&mut value)
        }
        .id_salt(field.wire_key())
        .hint_text(field.placeholder())
        .desired_width(f32::INFINITY);

        if ui.add(edit).changed() {
            self.form.on_field_change(field, value);
        }

        if let Some(message) = self.form.error_for(field) {
            let color = ui.visuals().error_fg_color;
            ui.label(egui::RichText::new(message).color(color).small());
        }
        ui.add_space(6.0);
    }

    fn show_terms_row(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            let mut accepted = self.form.terms_accepted();
            if ui.checkbox(&mut accepted, "Acepto los").changed() {
                self.form.on_terms_toggle(accepted);
            }
            if ui.link("términos y condiciones").clicked() {
                self.terms.open();
            }
        });
        if let Some(message) = self.form.error_for(ErrorKey::Terms) {
            let color = ui.visuals().error_fg_color;
            ui.label(egui::RichText::new(message).color(color).small());
        }
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        egui::Frame::NONE
            .fill(ui.visuals().faint_bg_color)
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(12, 10))
            .show(ui, |ui| {
                ui.label(
                    "ℹ Este formulario es exclusivo para personas mayores de edad que deseen participar en nuestro sorteo.",
                );
            });
        ui.add_space(12.0);

        for field in FormField::ALL {
            self.show_field(ui, field);
        }

        self.show_terms_row(ui);
        ui.add_space(12.0);

        let submitting = self.form.phase() == Phase::Submitting;
        let mut submit_clicked = false;
        ui.horizontal(|ui| {
            if submitting {
                ui.spinner();
            }
            let label = if submitting {
                "Procesando..."
            } else {
                "Participar en el sorteo"
            };
            let button = egui::Button::new(egui::RichText::new(label).strong().size(16.0))
                .min_size(egui::vec2(ui.available_width(), 40.0));
            submit_clicked = ui.add_enabled(self.form.can_submit(), button).clicked();
        });
        if submit_clicked {
            self.try_submit();
        }
    }

    fn show_success(&mut self, ui: &mut egui::Ui, code: String) {
        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            ui.label(egui::RichText::new("✔").size(48.0).color(egui::Color32::from_rgb(88, 160, 112)));
            ui.heading("¡Felicitaciones!");
            ui.label("Tu registro ha sido exitoso");
            ui.add_space(12.0);

            egui::Frame::NONE
                .fill(ui.visuals().faint_bg_color)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(16, 12))
                .show(ui, |ui| {
                    ui.weak("Tu código de participación es:");
                    ui.label(egui::RichText::new(&code).monospace().strong().size(22.0));
                });

            ui.add_space(8.0);
            if ui.button("Copiar código").clicked() {
                self.copy_code_to_clipboard(&code);
            }
            ui.add_space(8.0);
            ui.weak("Guarda este código para futuras referencias");
        });
    }

    fn show_notices(&self, ctx: &egui::Context) {
        if self.toasts.is_empty() {
            return;
        }
        egui::Area::new(egui::Id::new("registration_notices"))
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-16.0, 16.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                for toast in &self.toasts {
                    let (fill, stroke) = match toast.notice.kind {
                        NoticeKind::Success => (
                            egui::Color32::from_rgb(38, 94, 62),
                            egui::Color32::from_rgb(88, 160, 112),
                        ),
                        NoticeKind::Error => (
                            egui::Color32::from_rgb(111, 53, 53),
                            egui::Color32::from_rgb(175, 96, 96),
                        ),
                    };
                    egui::Frame::NONE
                        .fill(fill)
                        .stroke(egui::Stroke::new(1.0, stroke))
                        .corner_radius(8.0)
                        .inner_margin(egui::Margin::symmetric(10, 8))
                        .show(ui, |ui| {
                            ui.set_max_width(320.0);
                            ui.label(
                                egui::RichText::new(&toast.notice.message)
                                    .color(egui::Color32::WHITE),
                            );
                        });
                    ui.add_space(6.0);
                }
            });
    }
}

impl eframe::App for RegistrationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                let card_width = ui.available_width().min(CARD_MAX_WIDTH);
                ui.vertical_centered(|ui| {
                    ui.set_width(card_width);
                    egui::Frame::NONE
                        .fill(ui.visuals().extreme_bg_color)
                        .corner_radius(14.0)
                        .inner_margin(egui::Margin::symmetric(20, 18))
                        .show(ui, |ui| {
                            ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
                                self.show_header(ui);
                                ui.add_space(12.0);
                                self.show_backend_banner(ui);

                                match self.form.registration_code().map(str::to_string) {
                                    Some(code) => self.show_success(ui, code),
                                    None => self.show_form(ui),
                                }

                                ui.add_space(10.0);
                                ui.separator();
                                ui.small(egui::RichText::new(&self.status).weak());
                            });
                        });
                });
            });
        });

        show_terms_modal(ctx, &mut self.terms);
        self.show_notices(ctx);

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::events::UiErrorContext;
    use crossbeam_channel::bounded;

    fn app_with_channels() -> (
        RegistrationApp,
        Receiver<BackendCommand>,
        Sender<UiEvent>,
    ) {
        let (cmd_tx, cmd_rx) = bounded(4);
        let (ui_tx, ui_rx) = bounded(4);
        (RegistrationApp::new(cmd_tx, ui_rx), cmd_rx, ui_tx)
    }

    fn fill(app: &mut RegistrationApp) {
        app.form.on_field_change(FormField::FullName, "Ana Pérez");
        app.form.on_field_change(FormField::Email, "ana@example.com");
        app.form.on_field_change(FormField::Phone, "+51 999 999 999");
        app.form.on_field_change(FormField::Address, "Av. Lima 123");
        app.form.on_terms_toggle(true);
    }

    #[test]
    fn incomplete_form_shows_notice_and_queues_nothing() {
        let (mut app, cmd_rx, _ui_tx) = app_with_channels();
        app.try_submit();
        assert!(cmd_rx.try_recv().is_err());
        assert_eq!(app.toasts.len(), 1);
        assert_eq!(app.toasts[0].notice.kind, NoticeKind::Error);
    }

    #[test]
    fn valid_form_queues_exactly_one_submission() {
        let (mut app, cmd_rx, _ui_tx) = app_with_channels();
        fill(&mut app);

        app.try_submit();
        app.try_submit();

        match cmd_rx.try_recv() {
            Ok(BackendCommand::Submit { input }) => assert_eq!(input.email, "ana@example.com"),
            other => panic!("expected submit command, got {other:?}"),
        }
        assert!(cmd_rx.try_recv().is_err());
        assert_eq!(app.form.phase(), Phase::Submitting);
    }

    #[test]
    fn backend_result_completes_submission() {
        let (mut app, _cmd_rx, ui_tx) = app_with_channels();
        fill(&mut app);
        app.try_submit();

        ui_tx
            .send(UiEvent::SubmissionFinished(SubmissionResult::Success {
                registration_code: "ABC123".to_string(),
                message: Some("ok".to_string()),
            }))
            .expect("send");
        app.process_ui_events();

        assert_eq!(app.form.phase(), Phase::Succeeded);
        assert_eq!(app.form.registration_code(), Some("ABC123"));
        assert_eq!(app.toasts.last().map(|t| t.notice.kind), Some(NoticeKind::Success));
    }

    #[test]
    fn missing_worker_returns_form_to_editing() {
        let (mut app, cmd_rx, _ui_tx) = app_with_channels();
        drop(cmd_rx);
        fill(&mut app);

        app.try_submit();

        assert_eq!(app.form.phase(), Phase::Editing);
        assert_eq!(app.toasts.len(), 1);
        assert_eq!(app.toasts[0].notice.message, TRANSPORT_FALLBACK_MESSAGE);
    }

    #[test]
    fn worker_startup_failure_releases_pending_submission() {
        let (mut app, _cmd_rx, ui_tx) = app_with_channels();
        fill(&mut app);
        app.try_submit();
        assert_eq!(app.form.phase(), Phase::Submitting);

        ui_tx
            .send(UiEvent::Error(UiError::from_message(
                UiErrorContext::BackendStartup,
                "backend worker startup failure: failed to build runtime",
            )))
            .expect("send");
        app.process_ui_events();

        assert_eq!(app.form.phase(), Phase::Editing);
        assert!(app.form.can_submit());
        assert_eq!(
            app.toasts.last().map(|t| t.notice.message.as_str()),
            Some(TRANSPORT_FALLBACK_MESSAGE)
        );
        assert!(app.backend_error.is_some());
    }

    #[test]
    fn opening_terms_leaves_form_untouched() {
        let (mut app, _cmd_rx, _ui_tx) = app_with_channels();
        app.terms.open();
        app.terms.close();
        assert!(!app.form.terms_accepted());
        assert!(app.form.errors().is_valid());
    }
}
