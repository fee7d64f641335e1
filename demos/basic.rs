//! Standalone demo: opens a window with the radial picker and a readout.

use floem::prelude::*;
use floem::window::WindowConfig;
use floem_radial::{hsb_wheel, Hsb, Rgb, ShadowMode, WheelConfig};

fn main() {
    env_logger::init();

    let start = Rgb::new(0, 128, 255);
    let color = RwSignal::new(start.to_hsb());
    let config = WheelConfig::new(190.0, 50.0, 0.0).with_shadows(ShadowMode::Inner);

    floem::Application::new()
        .window(
            move |_| {
                v_stack((
                    hsb_wheel(color, config),
                    label(move || {
                        let hsb: Hsb = color.get();
                        format!("HSB {}   RGB {}", hsb, hsb.to_rgb())
                    })
                    .style(|s| s.font_size(12.0).font_family("monospace".to_string())),
                ))
                .style(|s| s.gap(12.0).padding(16.0).items_center())
                .on_event_stop(floem::event::EventListener::WindowClosed, |_| {
                    floem::quit_app()
                })
            },
            Some(
                WindowConfig::default()
                    .size((420.0, 460.0))
                    .title("floem-radial"),
            ),
        )
        .run();
}
