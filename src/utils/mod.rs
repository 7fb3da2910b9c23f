// Shared helpers: ASCII table rendering for text output and TOML config.
pub mod table {
    // Pad a cell to the column width.
    fn pad(cell: &str, width: usize) -> String {
        let mut s = String::with_capacity(width + 2);
        s.push(' ');
        s.push_str(cell);
        for _ in cell.len()..width {
            s.push(' ');
        }
        s.push(' ');
        s
    }

    fn rule(widths: &[usize]) -> String {
        let mut s = String::from("+");
        for w in widths {
            s.push_str(&"-".repeat(w + 2));
            s.push('+');
        }
        s
    }

    // Render a simple ASCII table given headers and rows.
    pub fn render(headers: &[&str], rows: &[Vec<String>]) -> String {
        let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
        for row in rows {
            for (i, w) in widths.iter_mut().enumerate() {
                *w = (*w).max(row.get(i).map_or(0, String::len));
            }
        }

        let mut out = String::new();
        out.push_str(&rule(&widths));
        out.push('\n');
        out.push('|');
        for (i, h) in headers.iter().enumerate() {
            out.push_str(&pad(h, widths[i]));
            out.push('|');
        }
        out.push('\n');
        out.push_str(&rule(&widths));
        out.push('\n');
        for row in rows {
            out.push('|');
            for (i, w) in widths.iter().enumerate() {
                out.push_str(&pad(row.get(i).map_or("", String::as_str), *w));
                out.push('|');
            }
            out.push('\n');
        }
        out.push_str(&rule(&widths));
        out
    }
}

pub mod config {
    use serde::Deserialize;
    use std::fs;
    use std::path::{Path, PathBuf};

    #[derive(Debug, Clone, Deserialize, Default)]
    pub struct DataConfig {
        pub airports: Option<String>,
        pub flights: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize, Default)]
    pub struct QueryConfig {
        pub default_format: Option<String>, // "text" | "json"
        pub max_paths: Option<usize>,
    }

    #[derive(Debug, Clone, Deserialize, Default)]
    pub struct DotConfig {
        pub clusters: Option<bool>,
        pub legend: Option<bool>,
        pub theme: Option<String>,   // "light" | "dark"
        pub rankdir: Option<String>, // "LR" | "TB"
    }

    #[derive(Debug, Clone, Deserialize, Default)]
    pub struct Config {
        pub data: Option<DataConfig>,
        pub query: Option<QueryConfig>,
        pub dot: Option<DotConfig>,
    }

    fn default_config_path(root: &Path) -> PathBuf {
        root.join("flight-network-explorer.toml")
    }

    #[must_use]
    pub fn load_config_at(path: &Path) -> Option<Config> {
        let data = fs::read_to_string(path).ok()?;
        toml::from_str::<Config>(&data).ok()
    }

    #[must_use]
    pub fn load_config_near(root: &Path) -> Option<Config> {
        let path = default_config_path(root);
        if path.exists() {
            load_config_at(&path)
        } else {
            None
        }
    }
}
