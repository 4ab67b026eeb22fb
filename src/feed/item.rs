// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rss::extension::itunes::ITunesItemExtensionBuilder;
use rss::extension::{ExtensionBuilder, ExtensionMap};
use rss::{EnclosureBuilder, GuidBuilder, ItemBuilder};

/// A single feed entry, derived from one audio file.
///
/// Entries are transient: created while iterating the media folder and
/// consumed immediately into the rendered document.
#[derive(Debug, Clone)]
pub struct Episode {
    /// Filename without extension
    pub title: String,
    /// Copy of the channel description
    pub description: String,
    /// Playback duration, truncated to whole seconds
    pub duration_seconds: u64,
    /// Public URL of the audio file
    pub url: String,
    /// Synthesized publish date
    pub pub_date: DateTime<Utc>,
}

impl Episode {
    /// Render this episode as an RSS item.
    ///
    /// The enclosure length field carries the duration in seconds, not the
    /// byte size. Consumers of the original feeds rely on this, so it is
    /// kept as-is.
    pub fn to_rss_item(&self) -> rss::Item {
        let duration = self.duration_seconds.to_string();

        let enclosure = EnclosureBuilder::default()
            .url(self.url.clone())
            .length(duration.clone())
            .mime_type("audio/mpeg")
            .build();

        let guid = GuidBuilder::default()
            .value(self.url.clone())
            .permalink(true)
            .build();

        let itunes = ITunesItemExtensionBuilder::default()
            .summary(self.description.clone())
            .subtitle(self.description.clone())
            .duration(duration)
            .build();

        ItemBuilder::default()
            .title(self.title.clone())
            .description(self.description.clone())
            .enclosure(enclosure)
            .guid(guid)
            .pub_date(self.pub_date.to_rfc2822())
            .itunes_ext(itunes)
            .extensions(itunesu_category())
            .build()
    }
}

/// The legacy `<itunesu:category itunesu:code="112"/>` element emitted on
/// every item.
fn itunesu_category() -> ExtensionMap {
    let mut attrs = BTreeMap::new();
    attrs.insert("itunesu:code".to_string(), "112".to_string());

    let category = ExtensionBuilder::default()
        .name("itunesu:category")
        .attrs(attrs)
        .build();

    let mut map = ExtensionMap::default();
    map.entry("itunesu".to_string())
        .or_default()
        .insert("category".to_string(), vec![category]);
    map
}
