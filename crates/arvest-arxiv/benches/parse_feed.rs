use arvest_arxiv::parse_feed;

/// Build a well-formed Atom feed with `n` entries.
fn synthetic_feed(n: usize) -> String {
    let mut feed = String::from(r#"<?xml version="1.0"?><feed xmlns="http://www.w3.org/2005/Atom">"#);
    for i in 0..n {
        feed.push_str(&format!(
            "<entry>\
             <id>http://arxiv.org/abs/2401.{i:05}v1</id>\
             <updated>2024-01-20T15:30:00Z</updated>\
             <title>Synthetic entry {i} about attention mechanisms</title>\
             <summary>We study synthetic entry {i} and its retrieval quality \
             under a variety of sparse attention patterns.</summary>\
             <author><name>Ada Lovelace</name></author>\
             <author><name>Charles Babbage</name></author>\
             <category term=\"cs.IR\" scheme=\"http://arxiv.org/schemas/atom\"/>\
             </entry>"
        ));
    }
    feed.push_str("</feed>");
    feed
}

#[divan::bench(args = [10, 100, 1000])]
fn parse_atom_feed(bencher: divan::Bencher, entries: usize) {
    let feed = synthetic_feed(entries);
    bencher.bench(|| {
        let parsed = parse_feed(divan::black_box(&feed)).unwrap();
        divan::black_box(parsed.records.len())
    });
}

fn main() {
    divan::main();
}
