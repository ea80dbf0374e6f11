use anyhow::Result;
use kings_core::model::deck::Deck;

/// Print the canonical deck, one card per line, or as a JSON array of
/// `{value, suit}` pairs.
pub fn run(players: usize, json: bool) -> Result<()> {
    let deck = Deck::canonical(players)?;
    if json {
        let cards: Vec<serde_json::Value> = deck
            .cards()
            .iter()
            .map(|c| serde_json::json!({ "value": c.rank, "suit": c.suit }))
            .collect();
        println!("{}", serde_json::to_string(&cards)?);
    } else {
        for (index, card) in deck.cards().iter().enumerate() {
            println!("{index:>2} {card} ({} of {})", card.rank, card.suit.name());
        }
    }
    Ok(())
}
