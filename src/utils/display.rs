/// How much of a long vector to show in logs.
#[derive(Debug, Clone, Copy)]
pub struct GlimpseConfig {
    pub max_items: usize,
    /// Items shown at each end when the vector is truncated.
    pub edge_items: usize,
    pub padding: usize,
    pub new_line: bool,
}

impl Default for GlimpseConfig {
    fn default() -> Self {
        GlimpseConfig {
            max_items: 10,
            edge_items: 3,
            padding: 0,
            new_line: false,
        }
    }
}

/// Short debug representation of a slice, long slices only show
/// their head and tail.
pub fn glimpse_vec<T: std::fmt::Debug>(v: &[T], config: Option<GlimpseConfig>) -> String {
    let config = config.unwrap_or_default();
    let len = v.len();
    let separator = if config.new_line { ",\n" } else { ", " };
    let padding = " ".repeat(config.padding);
    let fmt_items = |items: &[T]| -> Vec<String> {
        items
            .iter()
            .map(|x| format!("{}{:?}", padding, x))
            .collect()
    };

    let edge = config.edge_items.min(len / 2);
    if len > config.max_items && edge > 0 {
        let mut parts = fmt_items(&v[..edge]);
        parts.push(format!("{}...", padding));
        parts.extend(fmt_items(&v[len - edge..]));
        format!("[{}] len = {}", parts.join(separator), len)
    } else {
        format!("[{}]", fmt_items(v).join(separator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glimpse_short_vec() {
        assert_eq!(glimpse_vec(&[1, 2, 3], None), "[1, 2, 3]");
        assert_eq!(glimpse_vec::<u8>(&[], None), "[]");
    }

    #[test]
    fn test_glimpse_long_vec() {
        let v: Vec<usize> = (0..20).collect();
        assert_eq!(glimpse_vec(&v, None), "[0, 1, 2, ..., 17, 18, 19] len = 20");
    }
}
