#![no_main]

use libfuzzer_sys::fuzz_target;
use spdx_builder_scanner::license::{normalize_expression, parse_line_for_expression, split_expression};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let mut expressions = Vec::new();
    for line in text.lines() {
        if let Some(expr) = parse_line_for_expression(line) {
            assert!(!expr.is_empty(), "parsed expression must not be empty");
            // 분해 결과에 빈 토큰이 있으면 안 된다
            for token in split_expression(&expr) {
                assert!(!token.is_empty());
            }
            expressions.push(expr);
        }
    }

    expressions.sort();
    expressions.dedup();
    assert!(!normalize_expression(&expressions).is_empty());
});
