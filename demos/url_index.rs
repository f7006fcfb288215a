//! Indexing normalized URLs and listing everything under a site or path
use patricia_set::CompressedTrie;
use url::Url;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let raw = [
        "https://example.com/",
        "https://Example.com/about",
        "https://example.com/contact",
        "https://example.com/blog",
        "https://example.com/blog/first-post",
        "https://example.com:443/blog/second-post",
        "https://docs.example.com/guide",
        "http://example.org/",
    ];

    // Parsing normalizes host case and default ports, so equivalent URLs
    // map to the same key.
    let mut index = CompressedTrie::new();
    for s in raw {
        let url = Url::parse(s)?;
        index.insert(url.as_str())?;
    }
    println!("indexed {} urls", index.len());

    let blog = Url::parse("https://example.com/blog")?;
    println!("\nunder {}:", blog);
    for url in index.view_subtrie(blog.as_str()).keys::<String>() {
        println!("  {}", url);
    }

    let site = Url::parse("https://example.com")?;
    println!("\nunder {}:", site.origin().ascii_serialization());
    let mut site_urls: Vec<String> = index
        .range_search(&site.origin().ascii_serialization())
        .into_iter()
        .collect();
    site_urls.sort();
    for url in site_urls {
        println!("  {}", url);
    }

    let unknown = Url::parse("https://example.com/unknown")?;
    println!("\nURL existence check:");
    println!("  {} exists: {}", blog, index.search(blog.as_str()));
    println!("  {} exists: {}", unknown, index.search(unknown.as_str()));

    index.remove(blog.as_str());
    println!("\nafter removing {}: {:?}", blog, index);

    Ok(())
}
