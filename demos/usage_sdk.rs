use rlepack::config::RleConfig;
use rlepack::pipeline;

fn main() {
	let data = b"hello hello hhhhhhhhhhhhello ooooooooooooooo".to_vec();
	let mut input = std::io::Cursor::new(data);
	let mut compressed = Vec::new();
	let cfg = RleConfig::default().with_verify(true);
	let stats = pipeline::compress(&mut input, &mut compressed, &cfg).unwrap();
	println!("compressed {} -> {} ({} runs)", stats.original_size, stats.compressed_size, stats.runs);

	let mut comp_cur = std::io::Cursor::new(compressed);
	let mut restored = Vec::new();
	let stats = pipeline::decompress(&mut comp_cur, &mut restored, &cfg).unwrap();
	println!("restored {} bytes, clean: {}", restored.len(), stats.decode.is_clean());
}
