//! Human-readable composition summary.

use std::fmt;

use super::{Composition, Origin};

const RULE: &str = "============================================================";

impl fmt::Display for Composition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let meta = &self.metadata;
        let patterns = &self.patterns;
        let compat = &self.compatibility;

        writeln!(f, "{RULE}")?;
        writeln!(f, "  COMPOSITION SUMMARY")?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "  Mode:       {}", meta.mode.as_str().to_uppercase())?;
        writeln!(f, "  Seed:       {}", meta.seed)?;
        match &meta.time_or_bar {
            Origin::Time(time) => writeln!(f, "  Time:       {time}")?,
            Origin::BarNumber(bar) => writeln!(f, "  Bar:        {bar}")?,
        }
        writeln!(f, "  BPM:        {}", meta.bpm)?;
        writeln!(f, "  Bars:       {}", meta.bars)?;
        writeln!(f, "  Density:    {:.0}%", meta.density * 100.0)?;
        writeln!(f, "  Complexity: {:.0}%", meta.complexity * 100.0)?;
        writeln!(f)?;
        writeln!(f, "  Pattern Elements:")?;
        writeln!(f, "    - Kicks:      {} hits", patterns.kick.len())?;
        writeln!(f, "    - Snares:     {} hits", patterns.snare.len())?;
        writeln!(f, "    - Hi-hats:    {} hits", patterns.hat.len())?;
        writeln!(f, "    - Percussion: {} hits", patterns.perc.len())?;
        writeln!(f, "  Total Events: {}", patterns.total_events())?;

        writeln!(f)?;
        writeln!(f, "  SOUND COMPATIBILITY")?;
        writeln!(f, "  {}", "-".repeat(56))?;
        writeln!(
            f,
            "  Rating:      {} ({:.0}%)",
            compat.rating,
            compat.overall_score * 100.0
        )?;
        writeln!(f, "  Verdict:     {}", compat.verdict)?;
        if let Some(kit) = &compat.matching_kit {
            writeln!(f, "  Style Kit:   {kit}")?;
        }

        writeln!(f)?;
        writeln!(f, "  Sound Details:")?;
        for sound in &compat.sounds_used {
            writeln!(f, "    - {}", sound.summary)?;
        }

        let families = &compat.family_analysis.families;
        if !families.is_empty() {
            writeln!(f)?;
            writeln!(f, "  Families:    {}", families.join(", "))?;
        }
        let timbres = &compat.timbre_analysis.timbres;
        if !timbres.is_empty() {
            let names: Vec<&str> = timbres.iter().map(|t| t.as_str()).collect();
            writeln!(f, "  Timbres:     {}", names.join(", "))?;
        }

        write!(f, "{RULE}")
    }
}

#[cfg(test)]
mod tests {
    use crate::composition::{Composer, Origin};

    #[test]
    fn summary_lists_counts_and_rating() {
        let c = Composer::default().compose(16_000, Origin::BarNumber(16));
        let text = c.to_string();
        assert!(text.contains("Mode:       BAR"));
        assert!(text.contains("Bar:        16"));
        assert!(text.contains("Kicks:      8 hits"));
        assert!(text.contains("Total Events: 32"));
        assert!(text.contains(&format!("Rating:      {}", c.compatibility.rating)));
    }

    #[test]
    fn clock_summary_shows_time() {
        let c = Composer::default().compose(90_507, Origin::Time("09:05:07".into()));
        assert!(c.to_string().contains("Time:       09:05:07"));
    }
}
