/// Previous position in a cyclic list of `len` entries.
pub const fn wrap_decrement(index: usize, len: usize) -> usize {
    match (len, index) {
        (0, _) => 0,
        (_, 0) => len - 1,
        _ => (index - 1) % len,
    }
}

/// Next position in a cyclic list of `len` entries.
pub const fn wrap_increment(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (index + 1) % len
    }
}
