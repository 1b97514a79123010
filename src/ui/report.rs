use crate::ai::ProviderStatus;
use crate::commands::ProviderListing;
use colored::*;

fn status_icon(status: &ProviderStatus) -> &'static str {
    match status {
        ProviderStatus::Ready => "✅",
        ProviderStatus::NotAuthenticated => "⚠️",
        ProviderStatus::NotInstalled | ProviderStatus::Error(_) => "❌",
    }
}

fn status_text(status: &ProviderStatus) -> ColoredString {
    let text = match status {
        ProviderStatus::Error(message) if !message.is_empty() => {
            format!("{} ({})", status.as_str(), message)
        }
        _ => status.as_str().to_string(),
    };

    match status {
        ProviderStatus::Ready => text.green(),
        ProviderStatus::NotAuthenticated => text.yellow(),
        _ => text.red(),
    }
}

/// One line per provider: `  ✅ gemini (current) - ready`
pub fn format_listing(listing: &ProviderListing) -> String {
    let current = if listing.current {
        " (current)".cyan().to_string()
    } else {
        String::new()
    };
    format!(
        "  {} {}{} - {}",
        status_icon(&listing.status),
        listing.name.bold(),
        current,
        status_text(&listing.status)
    )
}

/// `gen provider -list` output
pub fn render_provider_list(listings: &[ProviderListing], preference: Option<&str>) -> String {
    let mut out = String::from("Available providers:\n");
    for listing in listings {
        out.push_str(&format_listing(listing));
        out.push('\n');
    }

    match preference {
        None => out.push_str("\nNo provider set (auto-detect mode)\n"),
        Some(name) if !listings.iter().any(|l| l.name == name) => {
            out.push_str(&format!(
                "\n{} Stored provider '{}' is not registered; run `gen provider -set auto`\n",
                "⚠️".yellow(),
                name
            ));
        }
        Some(_) => {}
    }

    out
}

/// Confirmation for `gen provider -set`
pub fn render_preference_saved(provider: Option<&str>) -> String {
    match provider {
        Some(name) => format!("Provider set to: {}", name.bold()),
        None => "Provider set to auto-detect".to_string(),
    }
}
