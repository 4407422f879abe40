// the collection of utility functions mainly for bracket parsing and proceeding
// all positions are byte offsets into the input string

/// true if every '(' has a matching ')'
pub fn brackets_balanced(s: &str) -> bool {
    let mut depth: i32 = 0;
    for c in s.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

// find position of the first occurrence of a char outside brackets
pub fn find_char_positions_outside_brackets(s: &str, c: char) -> Option<usize> {
    let mut depth = 0;
    for (i, ch) in s.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ if ch == c && depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

/// '+' or '-' at `pos` is a sign (not a binary operator) when nothing but another
/// operator or an opening bracket stands before it
fn is_unary_sign(input: &str, pos: usize) -> bool {
    match input[..pos].trim_end().chars().last() {
        None => true,
        Some(prev) => matches!(prev, '+' | '-' | '*' | '/' | '^' | '('),
    }
}

/// '+' or '-' at `pos` belongs to a float literal such as 1e-6
fn is_exponent_sign(input: &str, pos: usize) -> bool {
    let before = &input[..pos];
    let token_start = before
        .rfind(|c: char| !(c.is_ascii_alphanumeric() || c == '.' || c == '_'))
        .map(|i| i + 1)
        .unwrap_or(0);
    let token = &before[token_start..];
    match token.strip_suffix(['e', 'E']) {
        Some(mantissa) => !mantissa.is_empty() && mantissa.parse::<f64>().is_ok(),
        None => false,
    }
}

// function to find the rightmost binary operator among `operators` at bracket depth zero.
// Picking the rightmost one makes '-' and '/' left-associative.
pub fn find_rightmost_operator_outside_brackets(
    input: &str,
    operators: &[char],
) -> Option<(usize, char)> {
    let mut depth = 0;
    let mut last_op = None;
    for (i, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ if depth == 0 && operators.contains(&c) => {
                let sign = c == '+' || c == '-';
                if sign && (is_unary_sign(input, i) || is_exponent_sign(input, i)) {
                    continue;
                }
                last_op = Some((i, c));
            }
            _ => {}
        }
    }
    last_op
}

// code finds the position of the bracket closing the one opened at `bracket_start`
pub fn find_pair_to_this_bracket(input: &str, bracket_start: usize) -> Option<usize> {
    let mut depth = 0;
    for (i, c) in input[bracket_start..].char_indices() {
        if c == '(' {
            depth += 1;
        } else if c == ')' {
            depth -= 1;
            if depth == 0 {
                return Some(bracket_start + i);
            }
        }
    }
    None
}

/// true for "( ... )" where the first bracket is closed by the last char
pub fn is_wrapped_in_brackets(s: &str) -> bool {
    s.starts_with('(') && find_pair_to_this_bracket(s, 0) == Some(s.len() - 1)
}
