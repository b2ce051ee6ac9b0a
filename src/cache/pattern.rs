//! Pattern Matching Module
//!
//! Glob-style matching for bulk key enumeration. Supports `*` (any run of
//! characters, including empty) and `?` (exactly one character); every
//! other character matches literally.

// == Glob Match ==
/// Returns true if `key` matches the glob `pattern`.
///
/// Iterative two-pointer match with single-star backtracking, linear in
/// the key length for patterns with one `*` and never recursive, so an
/// adversarial pattern cannot blow the stack.
pub(crate) fn glob_match(pattern: &str, key: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let k: Vec<char> = key.chars().collect();

    let mut pi = 0;
    let mut ki = 0;
    // Position of the last `*` seen and the key index it was tried at
    let mut star: Option<(usize, usize)> = None;

    while ki < k.len() {
        if pi < p.len() && (p[pi] == '?' || p[pi] == k[ki]) {
            pi += 1;
            ki += 1;
        } else if pi < p.len() && p[pi] == '*' {
            star = Some((pi, ki));
            pi += 1;
        } else if let Some((star_pi, star_ki)) = star {
            // Backtrack: let the star swallow one more key character
            pi = star_pi + 1;
            ki = star_ki + 1;
            star = Some((star_pi, star_ki + 1));
        } else {
            return false;
        }
    }

    // Trailing stars match the empty remainder
    while pi < p.len() && p[pi] == '*' {
        pi += 1;
    }

    pi == p.len()
}
