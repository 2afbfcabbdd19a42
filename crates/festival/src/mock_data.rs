use festival_core::event::{Band, Event, Member};
use festival_core::storage::{EventRepository, Result};

/// Demo festival line-up.
///
/// Muse plays both GrasPop and Rock Werchter, so searching "wa" matches
/// both through Queen Anika Walsh and Alice Wayne.
pub fn demo_events() -> Vec<Event> {
    let metallica = Band::new(1, "Metallica").with_members([
        Member::new(1, "Queen Anika Walsh"),
        Member::new(2, "John Doe"),
    ]);
    let muse = Band::new(2, "Muse").with_members([Member::new(3, "Alice Wayne")]);
    let pink_floyd = Band::new(3, "Pink Floyd").with_members([
        Member::new(4, "Queen Frankie Gross"),
        Member::new(5, "Sir Harry Gray"),
    ]);
    let qotsa = Band::new(4, "Queens of the Stone Age").with_members([
        Member::new(6, "Queen Jessie Mercado"),
        Member::new(7, "Queen Louise Ryan"),
        Member::new(8, "Lady Sheila Gibbs"),
    ]);

    vec![
        Event::new(1, "GrasPop Metal Meeting")
            .with_img_url("img/1000.jpeg")
            .with_nb_stars(5)
            .with_comment("Metal under the Belgian sun")
            .with_bands([metallica.clone(), muse.clone()]),
        Event::new(2, "Rock Werchter")
            .with_img_url("img/2000.jpeg")
            .with_nb_stars(4)
            .with_bands([muse]),
        Event::new(3, "Hellfest")
            .with_img_url("img/3000.jpeg")
            .with_bands([pink_floyd, qotsa, metallica]),
        Event::new(4, "Download Festival")
            .with_img_url("img/4000.jpeg")
            .with_bands([]),
    ]
}

/// Writes the demo line-up when the store holds no events yet.
///
/// Returns the number of events written.
pub async fn seed_demo_events(repo: &dyn EventRepository) -> Result<usize> {
    if !repo.find_all().await?.is_empty() {
        tracing::debug!("Store already has events, skipping demo seed");
        return Ok(0);
    }

    let events = demo_events();
    for event in &events {
        repo.save(event).await?;
    }

    tracing::info!(count = events.len(), "Seeded demo events");
    Ok(events.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryRepository;
    use festival_core::event::filter_and_decorate;

    #[test]
    fn test_demo_search_matches_walsh_and_wayne() {
        let events = demo_events();

        let decorated = filter_and_decorate(&events, Some("Wa"));

        let titles: Vec<_> = decorated.iter().filter_map(|e| e.title.as_deref()).collect();
        assert_eq!(
            titles,
            vec![
                "GrasPop Metal Meeting [2]",
                "Rock Werchter [1]",
                "Hellfest [3]"
            ]
        );
    }

    #[tokio::test]
    async fn test_seed_writes_once() {
        let repo = InMemoryRepository::new();

        assert_eq!(seed_demo_events(&repo).await.unwrap(), demo_events().len());
        assert_eq!(seed_demo_events(&repo).await.unwrap(), 0);
        assert_eq!(repo.find_all().await.unwrap(), demo_events());
    }
}
