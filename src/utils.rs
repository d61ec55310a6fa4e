//! Shared utility functions

use bevy_egui::EguiContexts;

/// Check if keyboard input should be processed by snap tool systems.
///
/// Returns `false` (block input) while egui wants keyboard input, e.g. a text
/// field is focused.
///
/// # Example
/// ```ignore
/// fn my_input_handler(mut contexts: EguiContexts) {
///     if !should_process_input(&mut contexts) {
///         return;
///     }
///     // Handle input...
/// }
/// ```
pub fn should_process_input(contexts: &mut EguiContexts) -> bool {
    if let Ok(ctx) = contexts.ctx_mut() {
        if ctx.wants_keyboard_input() {
            return false;
        }
    }

    true
}

/// Check if a click landed on egui rather than the scene
pub fn pointer_over_ui(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_pointer_input() || ctx.is_pointer_over_area())
        .unwrap_or(false)
}
