//! Built-in datasets shown when neither the store nor the cache has rows

use crate::record::{GalleryItem, Initiative, TeamMember};

const UNSPLASH_PARAMS: &str =
    "ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop";

fn unsplash(photo: &str, width: u32) -> String {
    format!("https://images.unsplash.com/{photo}?{UNSPLASH_PARAMS}&w={width}&q=80")
}

/// Gallery placeholder events, newest first
#[must_use]
pub fn gallery_items() -> Vec<GalleryItem> {
    [
        (
            "1",
            "Entrepreneurship Summit 2023",
            "Annual flagship event featuring renowned speakers and workshops",
            "2023-10-15",
            "photo-1540575467063-178a50c2df87",
        ),
        (
            "2",
            "Startup Pitch Competition",
            "Students presenting innovative business ideas to industry experts",
            "2023-09-22",
            "photo-1519389950473-47ba0277781c",
        ),
        (
            "3",
            "Business Plan Workshop",
            "Interactive session on creating effective business plans",
            "2023-08-10",
            "photo-1577412647305-991150c7d163",
        ),
    ]
    .into_iter()
    .map(|(id, title, description, date, photo)| GalleryItem {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        date: date.to_string(),
        image_url: unsplash(photo, 1170),
    })
    .collect()
}

/// Placeholder leadership for the current batch
#[must_use]
pub fn team_members() -> Vec<TeamMember> {
    [
        ("1", "Alex Johnson", "President", "photo-1580489944761-15a19d654956", 761),
        ("2", "Sophia Martinez", "Vice President", "photo-1573497019940-1c28c88b4f3e", 774),
        ("3", "David Chen", "Secretary", "photo-1607990281513-2c110a25bd8c", 769),
    ]
    .into_iter()
    .map(|(id, name, position, photo, width)| TeamMember {
        id: id.to_string(),
        name: name.to_string(),
        position: position.to_string(),
        image_url: unsplash(photo, width),
        batch_year: crate::team::CURRENT_BATCH.to_string(),
        created_at: None,
    })
    .collect()
}

/// Flagship initiatives
#[must_use]
pub fn initiatives() -> Vec<Initiative> {
    [
        (
            "E-Summit",
            "Our annual flagship event bringing together entrepreneurs, investors, and students for networking, competitions, and inspiring talks.",
            "photo-1559223607-a43c990c692c",
            1170,
        ),
        (
            "Startup Incubation",
            "A program to support early-stage startups with resources, mentorship, and funding opportunities to help them grow and succeed.",
            "photo-1517048676732-d65bc937f952",
            1170,
        ),
        (
            "Workshop Series",
            "Regular workshops on various aspects of entrepreneurship and business to help students develop necessary skills and knowledge.",
            "photo-1544531585-9847b68c8c86",
            1170,
        ),
        (
            "Pitch Competition",
            "Platform for students to present their business ideas to a panel of judges and win prizes and mentorship opportunities.",
            "photo-1533750516278-4555388a4a06",
            1074,
        ),
        (
            "Mentorship Program",
            "Connecting students with experienced entrepreneurs and industry professionals for guidance and support.",
            "photo-1558403194-611308249627",
            1170,
        ),
        (
            "Innovation Lab",
            "A creative space where students can work on their projects, collaborate with peers, and access resources to bring their ideas to life.",
            "photo-1581094794329-c8112a89af12",
            1170,
        ),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (title, description, photo, width))| Initiative {
        id: (i + 1).to_string(),
        title: title.to_string(),
        description: description.to_string(),
        images: vec![unsplash(photo, width)],
        created_at: None,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{rank_roster, PriorityRoles, RosterEntry};

    #[test]
    fn gallery_defaults_are_newest_first() {
        let items = gallery_items();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].title, "Entrepreneurship Summit 2023");
        assert!(items.windows(2).all(|w| w[0].date > w[1].date));
        assert!(items[1]
            .image_url
            .starts_with("https://images.unsplash.com/photo-1519389950473-47ba0277781c?"));
    }

    #[test]
    fn default_team_ranks_in_listed_order() {
        let entries: Vec<_> = team_members()
            .iter()
            .map(|m| RosterEntry::new(&m.name, &m.position, &m.image_url).unwrap())
            .collect();
        let ranked = rank_roster(&entries, &PriorityRoles::default());
        assert_eq!(ranked, entries);
    }

    #[test]
    fn initiatives_have_one_image_each() {
        let all = initiatives();
        assert_eq!(all.len(), 6);
        assert!(all.iter().all(|i| i.images.len() == 1));
    }
}
