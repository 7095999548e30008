use ratatui::layout::Rect;

pub fn wrap_prev_index(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if current == 0 {
        len - 1
    } else {
        current - 1
    }
}

pub fn wrap_next_index(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if current + 1 >= len {
        0
    } else {
        current + 1
    }
}

pub fn centered_rect(terminal_size: Rect, numerator: u16, denominator: u16) -> Rect {
    let target_width = terminal_size.width.saturating_mul(numerator) / denominator;
    let target_height = (terminal_size.height.saturating_mul(numerator) / denominator).max(10);

    let max_width = terminal_size.width.saturating_sub(2).max(1);
    let max_height = terminal_size.height.saturating_sub(2).max(1);

    let modal_width = target_width.clamp(1, max_width);
    let modal_height = target_height.clamp(1, max_height);

    let modal_x = (terminal_size.width.saturating_sub(modal_width)) / 2;
    let modal_y = (terminal_size.height.saturating_sub(modal_height)) / 2;

    Rect::new(modal_x, modal_y, modal_width, modal_height)
}
