//! UI rendering helpers.
//!
//! Drawing for the image preview panel and the toast stack. Layout math is
//! kept in plain functions so it can be checked without a running context.

use super::toasts::ToastQueue;
use crate::notify::{ToastKind, ToastPosition};
use eframe::egui;
use std::time::Instant;

/// Side length of the square preview panel.
pub const PREVIEW_SIZE: f32 = 256.0;

const TOAST_MARGIN: f32 = 16.0;
const TOAST_WIDTH: f32 = 300.0;

/// Largest rectangle with the image's aspect ratio centred inside `container`.
pub fn fit_rect(container: egui::Rect, image_size: egui::Vec2) -> egui::Rect {
    if image_size.x <= 0.0 || image_size.y <= 0.0 {
        return container;
    }
    let scale = (container.width() / image_size.x).min(container.height() / image_size.y);
    egui::Rect::from_center_size(container.center(), image_size * scale)
}

/// Draws the preview panel: the photo if there is one, otherwise a faded
/// placeholder, dimmed under a spinner while generation runs.
///
/// # Arguments
/// * `ui` - The ui to allocate the panel in
/// * `texture` - The decoded photo, if any
/// * `alt_text` - Hover text for the panel
/// * `show_spinner` - Whether to draw the busy overlay
pub fn draw_preview_panel(
    ui: &mut egui::Ui,
    texture: Option<&egui::TextureHandle>,
    alt_text: &str,
    show_spinner: bool,
) -> egui::Response {
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(PREVIEW_SIZE, PREVIEW_SIZE), egui::Sense::hover());
    let painter = ui.painter_at(rect);

    painter.rect_filled(rect, 8.0, egui::Color32::from_gray(245));
    painter.rect_stroke(
        rect,
        8.0,
        egui::Stroke::new(1.0, egui::Color32::from_gray(200)),
        egui::StrokeKind::Inside,
    );

    let inner = rect.shrink(12.0);
    match texture {
        Some(texture) => {
            painter.image(
                texture.id(),
                fit_rect(inner, texture.size_vec2()),
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }
        None => {
            // Placeholder sits at three quarters size and 40% opacity
            let placeholder = egui::Rect::from_center_size(inner.center(), inner.size() * 0.75);
            let faded = egui::Color32::from_gray(120).gamma_multiply(0.4);
            painter.rect_stroke(
                placeholder,
                6.0,
                egui::Stroke::new(2.0, faded),
                egui::StrokeKind::Inside,
            );
            painter.text(
                placeholder.center(),
                egui::Align2::CENTER_CENTER,
                "preview",
                egui::FontId::proportional(20.0),
                faded,
            );
        }
    }

    if show_spinner {
        painter.rect_filled(rect, 8.0, egui::Color32::from_black_alpha(128));
        ui.put(
            egui::Rect::from_center_size(rect.center(), egui::vec2(40.0, 40.0)),
            egui::Spinner::new().size(40.0).color(egui::Color32::WHITE),
        );
    }

    response.on_hover_text(alt_text)
}

/// Screen anchor and inward offset for a toast position.
pub fn toast_anchor(position: ToastPosition) -> (egui::Align2, egui::Vec2) {
    match position {
        ToastPosition::TopLeft => {
            (egui::Align2::LEFT_TOP, egui::vec2(TOAST_MARGIN, TOAST_MARGIN))
        }
        ToastPosition::TopCenter => (egui::Align2::CENTER_TOP, egui::vec2(0.0, TOAST_MARGIN)),
        ToastPosition::TopRight => {
            (egui::Align2::RIGHT_TOP, egui::vec2(-TOAST_MARGIN, TOAST_MARGIN))
        }
        ToastPosition::BottomLeft => {
            (egui::Align2::LEFT_BOTTOM, egui::vec2(TOAST_MARGIN, -TOAST_MARGIN))
        }
        ToastPosition::BottomCenter => {
            (egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -TOAST_MARGIN))
        }
        ToastPosition::BottomRight => {
            (egui::Align2::RIGHT_BOTTOM, egui::vec2(-TOAST_MARGIN, -TOAST_MARGIN))
        }
    }
}

/// Background colour for a toast of the given kind.
pub fn toast_fill(kind: ToastKind) -> egui::Color32 {
    match kind {
        ToastKind::Info => egui::Color32::from_rgb(37, 99, 235),
        ToastKind::Success => egui::Color32::from_rgb(4, 120, 87),
        ToastKind::Error => egui::Color32::from_rgb(185, 28, 28),
    }
}

/// Draws every visible toast, stacked per screen position.
pub fn draw_toasts(ctx: &egui::Context, queue: &ToastQueue, now: Instant) {
    for position in ToastPosition::ALL {
        let mut toasts = queue
            .visible(now)
            .filter(|t| t.toast.position == position)
            .peekable();
        if toasts.peek().is_none() {
            continue;
        }

        let (align, offset) = toast_anchor(position);
        egui::Area::new(egui::Id::new(("toasts", position)))
            .anchor(align, offset)
            .order(egui::Order::Foreground)
            .interactable(false)
            .show(ctx, |ui| {
                for queued in toasts {
                    let layout = if queued.toast.rtl {
                        egui::Layout::top_down(egui::Align::Max)
                    } else {
                        egui::Layout::top_down(egui::Align::Min)
                    };

                    egui::Frame::popup(ui.style())
                        .fill(toast_fill(queued.kind))
                        .stroke(egui::Stroke::NONE)
                        .inner_margin(10.0)
                        .show(ui, |ui| {
                            ui.set_width(TOAST_WIDTH);
                            ui.with_layout(layout, |ui| {
                                ui.label(
                                    egui::RichText::new(&queued.toast.title)
                                        .strong()
                                        .color(egui::Color32::WHITE),
                                );
                                ui.label(
                                    egui::RichText::new(&queued.toast.text)
                                        .color(egui::Color32::WHITE),
                                );
                            });
                        });
                    ui.add_space(6.0);
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_rect_keeps_aspect_ratio() {
        let container = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(200.0, 200.0));
        let fitted = fit_rect(container, egui::vec2(400.0, 200.0));
        assert_eq!(fitted.size(), egui::vec2(200.0, 100.0));
        assert_eq!(fitted.center(), container.center());
    }

    #[test]
    fn test_fit_rect_degenerate_image() {
        let container = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(50.0, 50.0));
        assert_eq!(fit_rect(container, egui::vec2(0.0, 10.0)), container);
    }

    #[test]
    fn test_toast_anchor_points_inward() {
        let (align, offset) = toast_anchor(ToastPosition::BottomRight);
        assert_eq!(align, egui::Align2::RIGHT_BOTTOM);
        assert!(offset.x < 0.0 && offset.y < 0.0);

        let (align, offset) = toast_anchor(ToastPosition::TopLeft);
        assert_eq!(align, egui::Align2::LEFT_TOP);
        assert!(offset.x > 0.0 && offset.y > 0.0);
    }

    #[test]
    fn test_toast_colours_differ_by_kind() {
        assert_ne!(toast_fill(ToastKind::Info), toast_fill(ToastKind::Error));
        assert_ne!(toast_fill(ToastKind::Success), toast_fill(ToastKind::Error));
    }
}
