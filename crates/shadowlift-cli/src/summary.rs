use std::path::Path;

use console::Style;
use shadowlift_core::pipeline::config::EnhanceConfig;
use shadowlift_core::tone::ToneMode;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

/// Print the request summary to stderr, keeping stdout for the output path.
pub fn print_enhance_summary(input: &Path, output: Option<&Path>, config: &EnhanceConfig) {
    let s = Styles::new();

    eprintln!();
    eprintln!("  {}", s.title.apply_to("Shadowlift"));
    eprintln!("  {}", s.title.apply_to("\u{2550}".repeat(10)));
    eprintln!();

    eprintln!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(input.display())
    );
    match output {
        Some(path) => eprintln!(
            "  {:<14}{}",
            s.label.apply_to("Output"),
            s.path.apply_to(path.display())
        ),
        None => eprintln!(
            "  {:<14}{}",
            s.label.apply_to("Output"),
            s.disabled.apply_to("temporary file")
        ),
    }
    eprintln!(
        "  {:<14}{}",
        s.label.apply_to("Mode"),
        s.method.apply_to(config.mode)
    );
    eprintln!();

    let uses_offset = matches!(config.mode, ToneMode::LinearOffset | ToneMode::Combined);
    let uses_curve = matches!(config.mode, ToneMode::ShadowCurve | ToneMode::Combined);

    eprintln!("  {}", s.header.apply_to("Linear offset"));
    if uses_offset {
        eprintln!(
            "    {:<12}{}",
            s.label.apply_to("Lift"),
            s.value.apply_to(format!("{:.1}", config.shadow_lift))
        );
    } else {
        eprintln!("    {}", s.disabled.apply_to("not used"));
    }
    eprintln!();

    eprintln!("  {}", s.header.apply_to("Shadow curve"));
    if uses_curve {
        eprintln!(
            "    {:<12}{}",
            s.label.apply_to("Amount"),
            s.value.apply_to(format!("{:.0}%", config.shadow_amount * 100.0))
        );
        eprintln!(
            "    {:<12}{}",
            s.label.apply_to("Threshold"),
            s.value.apply_to(format!("L < {:.0}", config.curve.threshold))
        );
        eprintln!(
            "    {:<12}{}",
            s.label.apply_to("Magnitude"),
            s.value.apply_to(format!("{:.1}", config.curve.magnitude))
        );
    } else {
        eprintln!("    {}", s.disabled.apply_to("not used"));
    }
    eprintln!();

    eprintln!(
        "  {:<14}{}",
        s.header.apply_to("JPEG quality"),
        s.value.apply_to(config.output_quality)
    );
    eprintln!();
}
