const WORDS_PER_MINUTE: usize = 200;

/// Estimated reading time of the raw source, e.g. `"3 min read"`. Never below one minute.
pub fn estimate_read_time(text: &str) -> String {
    format!("{} min read", read_minutes(text))
}

pub fn read_minutes(text: &str) -> usize {
    let words = text.split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_one_minute() {
        assert_eq!(estimate_read_time(""), "1 min read");
    }

    #[test]
    fn rounds_up() {
        let text = "word ".repeat(201);
        assert_eq!(estimate_read_time(&text), "2 min read");
    }

    #[test]
    fn doubling_never_decreases() {
        for n in [0, 1, 150, 199, 200, 401, 1000] {
            let text = "w ".repeat(n);
            let doubled = "w ".repeat(n * 2);
            assert!(read_minutes(&doubled) >= read_minutes(&text), "n = {}", n);
        }
    }
}
