use chrono::NaiveDate;
use image::{DynamicImage, Rgba, RgbaImage};
use memo_gen::{
    ActivityItem, AssetName, DirectoryAssets, DocumentBuilder, DocumentEncoder, DrawOp, Identity,
    MemoryAssets, NoAssets, Notice, PdfEncoder, Period, Pt, ReportData, Template, TemplateVariant,
};
use std::io::Cursor;

fn report() -> ReportData {
    ReportData {
        period: Period::new(3, 2025),
        generated_on: NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
        sender: Identity::new("Rodrigo Lira Alvarez", "Practicante"),
        recipient: Identity::new("Angela Aquize Diaz", "Jefa del Comité de Mejora Continua"),
        activities: vec![
            ActivityItem::new("Inventario de materiales"),
            ActivityItem::new("Encuesta de satisfacción").with_description(lipsum::lipsum(40)),
        ],
    }
}

fn png(width: u32, height: u32) -> Vec<u8> {
    let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([20, 40, 90, 200])));
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), image::ImageOutputFormat::Png)
        .unwrap();
    bytes
}

fn image_ops(document: &memo_gen::Document) -> Vec<AssetName> {
    document
        .pages
        .iter()
        .flat_map(|page| page.images())
        .filter_map(|op| match op {
            DrawOp::Image { asset, .. } => Some(*asset),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn missing_assets_never_fail_a_build() {
    let builder = DocumentBuilder::new(Template::for_variant(TemplateVariant::Letterhead));
    let document = builder.build(&report(), &NoAssets).await.unwrap();

    assert!(image_ops(&document).is_empty());
    assert!(document.assets.is_empty());
    for name in [AssetName::Logo, AssetName::Signature] {
        assert!(document.has_notice(|n| matches!(
            n,
            Notice::AssetUnavailable { asset, .. } if *asset == name
        )));
    }

    // still encodes
    let bytes = PdfEncoder::new().encode_to_vec(&document).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn directory_assets_are_found_by_name() {
    let dir = tempfile::tempdir().unwrap();
    tokio::fs::write(dir.path().join("signature.png"), png(50, 15))
        .await
        .unwrap();
    tokio::fs::write(dir.path().join("logo.png"), png(30, 15))
        .await
        .unwrap();

    let provider = DirectoryAssets::new(dir.path());

    let standard = DocumentBuilder::new(Template::for_variant(TemplateVariant::Standard))
        .build(&report(), &provider)
        .await
        .unwrap();
    assert_eq!(image_ops(&standard), vec![AssetName::Signature]);
    assert!(standard.notices.is_empty());

    let letterhead = DocumentBuilder::new(Template::for_variant(TemplateVariant::Letterhead))
        .build(&report(), &provider)
        .await
        .unwrap();
    assert_eq!(image_ops(&letterhead), vec![AssetName::Logo, AssetName::Signature]);
    assert_eq!(letterhead.assets.len(), 2);

    let bytes = PdfEncoder { compress: false }
        .encode_to_vec(&letterhead)
        .unwrap();
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("/I0 Do"));
    assert!(text.contains("/I1 Do"));
    assert!(text.contains("/SMask"));
}

#[tokio::test]
async fn corrupt_signature_leaves_the_same_blank_space() {
    let good = MemoryAssets::new().with(AssetName::Signature, png(50, 15));
    let bad = MemoryAssets::new().with(AssetName::Signature, b"\x89PNG but not really".to_vec());
    let builder = DocumentBuilder::new(Template::for_variant(TemplateVariant::Standard));

    // lipsum text differs between calls, so both builds must share one report
    let report = report();
    let signed = builder.build(&report, &good).await.unwrap();
    let unsigned = builder.build(&report, &bad).await.unwrap();

    assert_eq!(image_ops(&signed), vec![AssetName::Signature]);
    assert!(image_ops(&unsigned).is_empty());
    assert_eq!(unsigned.notices.len(), 1);

    let texts = |document: &memo_gen::Document| -> Vec<(String, Pt)> {
        document
            .pages
            .iter()
            .flat_map(|page| page.ops.iter())
            .filter_map(|op| match op {
                DrawOp::Text { y, text, .. } => Some((text.clone(), *y)),
                _ => None,
            })
            .collect()
    };
    assert_eq!(texts(&signed), texts(&unsigned));
}

#[tokio::test]
async fn concurrent_builds_share_one_builder() {
    let builder = DocumentBuilder::new(Template::for_variant(TemplateVariant::Memorandum));
    let first = report();
    let mut second = report();
    second.period = Period::new(4, 2025);

    let (a, b) = tokio::join!(
        builder.build(&first, &NoAssets),
        builder.build(&second, &NoAssets)
    );
    let (a, b) = (a.unwrap(), b.unwrap());
    assert!(a.pages[0].contains_text("MEMORÁNDUM Nº 003-2025"));
    assert!(b.pages[0].contains_text("MEMORÁNDUM Nº 004-2025"));
    assert!(std::sync::Arc::ptr_eq(&a.fonts, &b.fonts));
}
