pub mod types;

use rune_popup::Size;

pub use types::RuneWindowEvent;

fn clamp_to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

pub fn translate_window_event(event: &winit::event::WindowEvent) -> Option<RuneWindowEvent> {
    use winit::event::{ElementState, WindowEvent};
    match event {
        WindowEvent::Resized(sz) => Some(RuneWindowEvent::Resized(Size::new(
            clamp_to_i32(sz.width),
            clamp_to_i32(sz.height),
        ))),
        WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
            Some(RuneWindowEvent::ScaleFactorChanged(*scale_factor))
        }
        WindowEvent::CursorMoved { position, .. } => Some(RuneWindowEvent::CursorMoved {
            position: [position.x as f32, position.y as f32],
        }),
        WindowEvent::MouseInput { state, button, .. } => match state {
            ElementState::Pressed => Some(RuneWindowEvent::MousePressed(*button)),
            ElementState::Released => Some(RuneWindowEvent::MouseReleased(*button)),
        },
        WindowEvent::RedrawRequested => Some(RuneWindowEvent::RedrawRequested),
        WindowEvent::CloseRequested => Some(RuneWindowEvent::CloseRequested),
        _ => None,
    }
}
