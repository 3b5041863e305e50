/// Catalog reconciliation policy.
///
/// The remote catalog lives in a backing store that is seeded lazily by
/// another collaborator, so it can be empty or contain duplicate seeds.
/// Neither condition is an error for callers: an empty or unavailable
/// catalog falls back to the built-in defaults below, and duplicate
/// artist entries are dropped before they reach a selection list.
use std::collections::HashSet;

use crate::model::{Artist, Service};

/// Built-in service catalog, used whenever the remote list is missing or empty.
pub fn default_services() -> Vec<Service> {
    vec![
        Service {
            service_id: "service-custom-tattoo".to_string(),
            name: "Custom Tattoo".to_string(),
            description: "Fully customized tattoo design tailored to your vision. Consultation included.".to_string(),
            duration_minutes: 180,
            price_start: 200,
            icon: "Palette".to_string(),
        },
        Service {
            service_id: "service-small-tattoo".to_string(),
            name: "Small Tattoo".to_string(),
            description: "Simple, small designs perfect for first-timers. Quick and affordable.".to_string(),
            duration_minutes: 60,
            price_start: 80,
            icon: "Sparkles".to_string(),
        },
        Service {
            service_id: "service-cover-up".to_string(),
            name: "Cover-Up".to_string(),
            description: "Expert cover-up work to transform old tattoos into something new.".to_string(),
            duration_minutes: 240,
            price_start: 300,
            icon: "RefreshCw".to_string(),
        },
        Service {
            service_id: "service-consultation".to_string(),
            name: "Consultation".to_string(),
            description: "Free consultation to discuss your ideas and get a quote.".to_string(),
            duration_minutes: 30,
            price_start: 0,
            icon: "MessageCircle".to_string(),
        },
    ]
}

/// Built-in artist roster, used whenever the remote list is missing or empty.
pub fn default_artists() -> Vec<Artist> {
    vec![
        Artist {
            artist_id: "artist-marcus-chen".to_string(),
            name: "Marcus Chen".to_string(),
            bio: "Specializing in blackwork and geometric designs with 12 years of experience. Every piece tells a story.".to_string(),
            specialty: "Blackwork & Geometric".to_string(),
            image_url: "https://images.unsplash.com/photo-1655960556432-b74f6ff0a54b?crop=entropy&cs=srgb&fm=jpg&q=85".to_string(),
            instagram: Some("@marcuschen.ink".to_string()),
            years_experience: 12,
        },
        Artist {
            artist_id: "artist-aria-rodriguez".to_string(),
            name: "Aria Rodriguez".to_string(),
            bio: "Fine line artist passionate about minimalist designs and delicate floral work. Precision is my art.".to_string(),
            specialty: "Fine Line & Floral".to_string(),
            image_url: "https://images.unsplash.com/photo-1767887874488-5f715c7db794?crop=entropy&cs=srgb&fm=jpg&q=85".to_string(),
            instagram: Some("@aria.fineline".to_string()),
            years_experience: 8,
        },
        Artist {
            artist_id: "artist-jake-morrison".to_string(),
            name: "Jake Morrison".to_string(),
            bio: "Traditional American tattoo artist with a modern twist. Bold lines, vibrant colors, timeless designs.".to_string(),
            specialty: "Traditional American".to_string(),
            image_url: "https://images.unsplash.com/photo-1604449325317-4967c715538a?crop=entropy&cs=srgb&fm=jpg&q=85".to_string(),
            instagram: Some("@jakemorrison.trad".to_string()),
            years_experience: 15,
        },
    ]
}

/// Identity key for duplicate detection: the first non-empty of normalized
/// name, instagram handle, and artist id. Entries with no derivable key are
/// never deduplicated against anything.
fn identity_key(artist: &Artist) -> Option<String> {
    let candidates = [
        Some(artist.name.as_str()),
        artist.instagram.as_deref(),
        Some(artist.artist_id.as_str()),
    ];
    candidates.into_iter().flatten().find_map(|raw| {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            None
        } else {
            Some(normalized)
        }
    })
}

/// Drops artists whose identity key has already been seen. First occurrence
/// wins and the relative order of survivors is preserved.
pub fn dedup_artists(artists: Vec<Artist>) -> Vec<Artist> {
    let mut seen = HashSet::new();
    artists
        .into_iter()
        .filter(|artist| match identity_key(artist) {
            Some(key) => seen.insert(key),
            None => true,
        })
        .collect()
}

/// Resolves the remote service list against the fallback policy.
/// `None` means the fetch failed; an empty list is treated the same way.
pub fn resolve_services(remote: Option<Vec<Service>>) -> Vec<Service> {
    match remote {
        Some(services) if !services.is_empty() => services,
        _ => default_services(),
    }
}

/// Resolves the remote artist list against the fallback policy, deduplicating
/// surviving remote entries.
pub fn resolve_artists(remote: Option<Vec<Artist>>) -> Vec<Artist> {
    match remote {
        Some(artists) if !artists.is_empty() => dedup_artists(artists),
        _ => default_artists(),
    }
}
