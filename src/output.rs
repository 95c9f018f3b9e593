// SPDX-License-Identifier: MIT
//
// Rendering of command results as text tables or JSON.
//
// Every writer takes `&mut impl Write` so tests can capture into a Vec.
// Swatches are 24-bit background escapes (ESC[48;2;R;G;Bm) and are only
// emitted for text output on a terminal with NO_COLOR unset.

use std::env;
use std::io::{self, IsTerminal, Write};

use anyhow::Result;
use serde::Serialize;
use tl_color::{Argb, GamutReduction, Hct, HctColor};
use tl_theme::cache::NamedTheme;
use tl_theme::tonal::TonalPalette;
use tl_theme::{CorePaletteSet, PaletteRole, Role, RoleColorMap, SourceColorSet};

use crate::cli::OutputFormat;

const SWATCH_WIDTH: usize = 4;

// Palette table column; the widest header is "neutralVariant".
const CELL_WIDTH: usize = 14;

pub struct Printer {
    format: OutputFormat,
    swatches: bool,
}

impl Printer {
    /// A printer for stdout, with swatches when stdout is a color terminal.
    pub fn stdout(format: OutputFormat) -> Self {
        let swatches = format == OutputFormat::Text
            && io::stdout().is_terminal()
            && env::var_os("NO_COLOR").is_none();
        Self { format, swatches }
    }

    #[cfg(test)]
    const fn plain(format: OutputFormat) -> Self {
        Self {
            format,
            swatches: false,
        }
    }

    fn swatch(&self, argb: Argb) -> String {
        if self.swatches {
            format!(
                "\x1b[48;2;{};{};{}m{}\x1b[0m ",
                argb.red(),
                argb.green(),
                argb.blue(),
                " ".repeat(SWATCH_WIDTH)
            )
        } else {
            String::new()
        }
    }

    fn json(w: &mut impl Write, value: &impl Serialize) -> Result<()> {
        serde_json::to_writer_pretty(&mut *w, value)?;
        writeln!(w)?;
        Ok(())
    }

    // ── Schemes ──────────────────────────────────────────────────────

    /// Every role, or only `roles` when non-empty.
    pub fn scheme(&self, w: &mut impl Write, scheme: &RoleColorMap, roles: &[Role]) -> Result<()> {
        let wanted = |role: &Role| roles.is_empty() || roles.contains(role);
        if self.format == OutputFormat::Json {
            if roles.is_empty() {
                return Self::json(w, scheme);
            }
            let mut map = scheme.to_hex_map();
            map.retain(|role, _| wanted(role));
            return Self::json(w, &map);
        }
        let mode = if scheme.is_dark() { "dark" } else { "light" };
        writeln!(w, "# {mode} scheme")?;
        for (role, argb) in scheme.iter().filter(|(role, _)| wanted(role)) {
            writeln!(w, "{:<24} {}{}", role.key(), self.swatch(argb), argb.to_hex())?;
        }
        Ok(())
    }

    // ── Palettes ─────────────────────────────────────────────────────

    pub fn palettes(&self, w: &mut impl Write, palettes: &CorePaletteSet) -> Result<()> {
        let stops = TonalPalette::stops();
        if self.format == OutputFormat::Json {
            let rows: Vec<PaletteJson> = palettes
                .iter()
                .map(|(role, palette)| PaletteJson::new(role, palette, &stops))
                .collect();
            return Self::json(w, &rows);
        }

        write!(w, "{:>4}", "tone")?;
        for role in PaletteRole::ALL {
            write!(w, "  {:<CELL_WIDTH$}", role.name())?;
        }
        writeln!(w)?;
        for &tone in &stops {
            write!(w, "{tone:>4}")?;
            for (_, palette) in palettes.iter() {
                let argb = palette.tone(tone);
                let pad = CELL_WIDTH - self.swatch_columns();
                write!(w, "  {}{:<pad$}", self.swatch(argb), argb.to_hex())?;
            }
            writeln!(w)?;
        }
        Ok(())
    }

    // Visible width of a swatch, escapes excluded.
    const fn swatch_columns(&self) -> usize {
        if self.swatches { SWATCH_WIDTH + 1 } else { 0 }
    }

    // ── Conversions ──────────────────────────────────────────────────

    pub fn hct(&self, w: &mut impl Write, color: &HctColor) -> Result<()> {
        if self.format == OutputFormat::Json {
            return Self::json(w, color);
        }
        writeln!(
            w,
            "{}{}  hue {:.2}  chroma {:.2}  tone {:.2}",
            self.swatch(color.to_argb()),
            color.hex(),
            color.hue(),
            color.chroma(),
            color.tone()
        )?;
        Ok(())
    }

    pub fn solved(
        &self,
        w: &mut impl Write,
        hct: Hct,
        reduction: Option<GamutReduction>,
    ) -> Result<()> {
        let argb = hct.to_argb();
        if self.format == OutputFormat::Json {
            return Self::json(
                w,
                &SolvedJson {
                    hex: argb.to_hex(),
                    hue: hct.hue(),
                    chroma: hct.chroma(),
                    tone: hct.tone(),
                    requested_chroma: reduction.map(|r| r.requested),
                },
            );
        }
        write!(w, "{}{}", self.swatch(argb), argb.to_hex())?;
        if let Some(r) = reduction {
            write!(
                w,
                "  (chroma {:.1} reduced to {:.1} to fit sRGB)",
                r.requested, r.realized
            )?;
        }
        writeln!(w)?;
        Ok(())
    }

    // ── Saved themes ─────────────────────────────────────────────────

    pub fn themes(&self, w: &mut impl Write, themes: &[NamedTheme]) -> Result<()> {
        if self.format == OutputFormat::Json {
            return Self::json(w, &themes);
        }
        if themes.is_empty() {
            writeln!(w, "no saved themes")?;
            return Ok(());
        }
        let name_width = themes
            .iter()
            .map(|t| t.name.chars().count())
            .max()
            .unwrap_or(0)
            .max(4);
        for (index, theme) in themes.iter().enumerate() {
            write!(w, "{index:>3}  {:<name_width$}", theme.name)?;
            for color in [&theme.primary, &theme.secondary, &theme.background] {
                write!(w, "  {}{}", self.swatch(color.to_argb()), color.hex())?;
            }
            writeln!(w)?;
        }
        Ok(())
    }

    /// One-line confirmation for a state change. JSON output stays pure:
    /// the message goes nowhere and callers print the resulting list.
    pub fn status(&self, w: &mut impl Write, message: &str) -> Result<()> {
        if self.format == OutputFormat::Text {
            writeln!(w, "{message}")?;
        }
        Ok(())
    }

    // ── Presets ──────────────────────────────────────────────────────

    pub fn presets(&self, w: &mut impl Write, presets: &[(&str, SourceColorSet)]) -> Result<()> {
        if self.format == OutputFormat::Json {
            let rows: Vec<PresetJson<'_>> = presets
                .iter()
                .map(|(name, sources)| PresetJson { name, sources })
                .collect();
            return Self::json(w, &rows);
        }
        for (name, sources) in presets {
            write!(w, "{name:<10}")?;
            for (role, color) in sources.iter() {
                write!(w, "  {role} {}{}", self.swatch(color.to_argb()), color.hex())?;
            }
            writeln!(w)?;
        }
        Ok(())
    }
}

// ─── JSON shapes ─────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ToneJson {
    tone: u8,
    hex: String,
}

#[derive(Serialize)]
struct PaletteJson {
    role: &'static str,
    hue: f64,
    chroma: f64,
    tones: Vec<ToneJson>,
}

impl PaletteJson {
    fn new(role: PaletteRole, palette: &TonalPalette, stops: &[u8]) -> Self {
        Self {
            role: role.name(),
            hue: palette.hue(),
            chroma: palette.chroma(),
            tones: palette
                .tones(stops)
                .into_iter()
                .map(|(tone, argb)| ToneJson {
                    tone,
                    hex: argb.to_hex(),
                })
                .collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SolvedJson {
    hex: String,
    hue: f64,
    chroma: f64,
    tone: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    requested_chroma: Option<f64>,
}

#[derive(Serialize)]
struct PresetJson<'a> {
    name: &'a str,
    sources: &'a SourceColorSet,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tl_color::hex_to_hct;
    use tl_theme::builtin::builtin_sources;
    use tl_theme::state::ThemeContext;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn baseline() -> SourceColorSet {
        SourceColorSet::from_primary(hex_to_hct("#6750A4").unwrap())
    }

    // ── scheme ───────────────────────────────────────────────────────

    #[test]
    fn scheme_text_lists_every_role() {
        let out = render(|w| Printer::plain(OutputFormat::Text).scheme(w, &RoleColorMap::light(&baseline()), &[]));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 37);
        assert_eq!(lines[0], "# light scheme");
        assert!(lines.iter().any(|l| l.starts_with("primary ") && l.ends_with("#6750a4")));
        assert!(!out.contains('\x1b'));
    }

    #[test]
    fn scheme_json_is_flat_map() {
        let out = render(|w| Printer::plain(OutputFormat::Json).scheme(w, &RoleColorMap::dark(&baseline()), &[]));
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let map = value.as_object().unwrap();
        assert_eq!(map.len(), 36);
        assert_eq!(map["primary"], "#cfbcff");
        assert_eq!(map["onPrimary"], "#381e72");
    }

    #[test]
    fn scheme_role_filter() {
        let scheme = RoleColorMap::dark(&baseline());
        let roles = [Role::OnPrimary, Role::Primary];

        let out = render(|w| Printer::plain(OutputFormat::Text).scheme(w, &scheme, &roles));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("primary "));
        assert!(lines[2].starts_with("onPrimary "));

        let out = render(|w| Printer::plain(OutputFormat::Json).scheme(w, &scheme, &roles));
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let map = value.as_object().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["primary"], "#cfbcff");
    }

    // ── palettes ─────────────────────────────────────────────────────

    #[test]
    fn palette_table_has_row_per_stop() {
        let palettes = CorePaletteSet::build(&baseline(), tl_theme::PaletteStyle::Material);
        let out = render(|w| Printer::plain(OutputFormat::Text).palettes(w, &palettes));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 1 + TonalPalette::stops().len());
        assert!(lines[0].contains("neutralVariant"));
        let t40 = lines.iter().find(|l| l.trim_start().starts_with("40 ")).unwrap();
        assert!(t40.contains("#6750a4"));
    }

    #[test]
    fn palette_json_lists_six_roles() {
        let palettes = CorePaletteSet::build(&baseline(), tl_theme::PaletteStyle::Material);
        let out = render(|w| Printer::plain(OutputFormat::Json).palettes(w, &palettes));
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[5]["role"], "neutralVariant");
        assert_eq!(rows[0]["tones"].as_array().unwrap().len(), 23);
    }

    // ── conversions ──────────────────────────────────────────────────

    #[test]
    fn hct_text_keeps_input_hex() {
        let color = hex_to_hct("#6750A4").unwrap();
        let out = render(|w| Printer::plain(OutputFormat::Text).hct(w, &color));
        assert_eq!(out, "#6750A4  hue 298.98  chroma 47.86  tone 40.08\n");
    }

    #[test]
    fn solved_reports_reduction() {
        let (hct, reduction) = Hct::solve_with_report(120.0, 150.0, 50.0);
        assert!(reduction.is_some());
        let text = render(|w| Printer::plain(OutputFormat::Text).solved(w, hct, reduction));
        assert!(text.contains("reduced to"));

        let json = render(|w| Printer::plain(OutputFormat::Json).solved(w, hct, reduction));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["requestedChroma"], 150.0);
    }

    #[test]
    fn solved_in_gamut_is_bare_hex() {
        let (hct, reduction) = Hct::solve_with_report(298.98, 20.0, 40.0);
        assert!(reduction.is_none());
        let text = render(|w| Printer::plain(OutputFormat::Text).solved(w, hct, reduction));
        assert_eq!(text.trim_end(), hct.to_argb().to_hex());
    }

    // ── themes / presets ─────────────────────────────────────────────

    #[test]
    fn empty_theme_list() {
        let out = render(|w| Printer::plain(OutputFormat::Text).themes(w, &[]));
        assert_eq!(out, "no saved themes\n");
        let out = render(|w| Printer::plain(OutputFormat::Json).themes(w, &[]));
        assert_eq!(out.trim(), "[]");
    }

    #[test]
    fn theme_rows_are_indexed() {
        let themes = vec![
            ThemeContext::default().capture("Day"),
            ThemeContext::default().capture("Second"),
        ];
        let out = render(|w| Printer::plain(OutputFormat::Text).themes(w, &themes));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "  0  Day     #6750a4  #625b71  #fffbff");
        assert!(lines[1].starts_with("  1  Second"));
    }

    #[test]
    fn status_is_text_only() {
        let out = render(|w| Printer::plain(OutputFormat::Text).status(w, "saved"));
        assert_eq!(out, "saved\n");
        let out = render(|w| Printer::plain(OutputFormat::Json).status(w, "saved"));
        assert_eq!(out, "");
    }

    #[test]
    fn presets_json() {
        let presets = vec![("ocean", builtin_sources("ocean").unwrap())];
        let out = render(|w| Printer::plain(OutputFormat::Json).presets(w, &presets));
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["name"], "ocean");
        assert_eq!(value[0]["sources"]["tertiary"]["hex"], "#009688");
    }

    #[test]
    fn swatch_is_truecolor_background() {
        let printer = Printer {
            format: OutputFormat::Text,
            swatches: true,
        };
        assert_eq!(
            printer.swatch(Argb::from_rgb(0x67, 0x50, 0xa4)),
            "\x1b[48;2;103;80;164m    \x1b[0m "
        );
    }
}
