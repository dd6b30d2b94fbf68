use lazydispatch::apps::FoodRatings;

fn main() {
    let mut fr = FoodRatings::new([
        ("kimchi", "korean", 9),
        ("miso", "japanese", 12),
        ("sushi", "japanese", 8),
        ("moussaka", "greek", 15),
        ("ramen", "japanese", 14),
        ("bulgogi", "korean", 7),
    ]);

    println!("korean   -> {:?}", fr.highest_rated("korean"));
    println!("japanese -> {:?}", fr.highest_rated("japanese"));

    fr.change_rating("sushi", 16);
    println!("japanese -> {:?}", fr.highest_rated("japanese"));

    fr.change_rating("ramen", 16);
    println!("japanese -> {:?}", fr.highest_rated("japanese"));
}

// Expected output:
// korean   -> Some("kimchi")
// japanese -> Some("ramen")
// japanese -> Some("sushi")
// japanese -> Some("ramen")
//
// Explanation: "ramen" and "sushi" tie at 16; the lexicographically smaller
// name wins.
