use super::*;
use crate::raster::PixelLayout;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "chartas_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn open_store(name: &str) -> CanvasStore {
    CanvasStore::open(StoreConfig {
        stripes: 8,
        ..StoreConfig::with_root(temp_dir(name))
    })
    .unwrap()
}

fn files_in(dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect()
}

#[test]
fn open_creates_missing_root_once() {
    let root = temp_dir("store_open").join("nested").join("dir");
    assert!(!root.exists());

    let store = CanvasStore::open(StoreConfig::with_root(&root)).unwrap();
    assert!(root.is_dir());
    assert_eq!(store.root(), root.as_path());

    // Reopening an existing root is fine.
    CanvasStore::open(StoreConfig::with_root(&root)).unwrap();
    std::fs::remove_dir_all(temp_dir("store_open")).ok();
}

#[test]
fn open_rejects_invalid_config() {
    let err = CanvasStore::open(StoreConfig {
        stripes: 0,
        ..StoreConfig::with_root(temp_dir("store_bad_cfg"))
    })
    .unwrap_err();
    assert!(matches!(err, ChartasError::Config(_)));
}

#[test]
fn crud_round_trip() {
    let store = open_store("store_crud");
    let blank = Raster::blank(20, 40);
    let id = store.create(&blank).unwrap();
    let key = id.to_string();

    assert!(store.path_for(&id).is_file());
    assert!(store.exists(&key));
    assert_eq!(store.read(&key).unwrap(), blank);

    let mut painted = blank.clone();
    assert!(painted.set_pixel(3, 7, &[10, 20, 30]));
    store.update(&key, &painted).unwrap();
    assert_eq!(store.read(&key).unwrap(), painted);

    store.delete(&key).unwrap();
    assert!(!store.exists(&key));
    assert!(matches!(
        store.read(&key),
        Err(ChartasError::NotFound { .. })
    ));

    std::fs::remove_dir_all(store.root()).ok();
}

#[test]
fn file_name_is_id_with_extension() {
    let store = open_store("store_name");
    let id = store.create(&Raster::blank(1, 1)).unwrap();
    let files = files_in(store.root());
    assert_eq!(files.len(), 1);
    assert_eq!(
        files[0].file_name().unwrap().to_string_lossy(),
        format!("{id}.bmp")
    );
    std::fs::remove_dir_all(store.root()).ok();
}

#[test]
fn unknown_and_malformed_ids_are_not_found() {
    let store = open_store("store_not_found");
    let missing = CanvasId::generate().to_string();

    match store.read(&missing) {
        Err(ChartasError::NotFound { id, path }) => {
            assert_eq!(id, missing);
            assert!(path.ends_with(format!("{missing}.bmp")));
        }
        other => panic!("expected NotFound, got {other:?}"),
    }

    assert!(matches!(
        store.read("../../etc/passwd"),
        Err(ChartasError::NotFound { .. })
    ));
    assert!(matches!(
        store.update(&missing, &Raster::blank(1, 1)),
        Err(ChartasError::NotFound { .. })
    ));
    assert!(files_in(store.root()).is_empty());

    std::fs::remove_dir_all(store.root()).ok();
}

#[test]
fn undecodable_file_is_not_found() {
    let store = open_store("store_corrupt");
    let id = store.create(&Raster::blank(2, 2)).unwrap();
    std::fs::write(store.path_for(&id), b"garbage").unwrap();

    assert!(matches!(
        store.read(&id.to_string()),
        Err(ChartasError::NotFound { .. })
    ));
    std::fs::remove_dir_all(store.root()).ok();
}

#[test]
fn alpha_raster_create_fails_without_writing() {
    let store = open_store("store_alpha_create");
    let err = store
        .create(&Raster::black(2, 2, PixelLayout::Rgba8))
        .unwrap_err();
    assert!(matches!(err, ChartasError::Encoding(_)));
    assert!(files_in(store.root()).is_empty());
    std::fs::remove_dir_all(store.root()).ok();
}

#[test]
fn alpha_raster_update_keeps_previous_content() {
    let store = open_store("store_alpha_update");
    let original = Raster::filled(3, 3, [1, 2, 3]);
    let id = store.create(&original).unwrap();
    let key = id.to_string();

    let err = store
        .update(&key, &Raster::black(3, 3, PixelLayout::Rgba8))
        .unwrap_err();
    assert!(matches!(err, ChartasError::Encoding(_)));
    assert_eq!(store.read(&key).unwrap(), original);
    assert_eq!(files_in(store.root()).len(), 1);

    std::fs::remove_dir_all(store.root()).ok();
}

#[test]
fn modify_error_leaves_file_untouched() {
    let store = open_store("store_modify_err");
    let original = Raster::filled(2, 2, [4, 4, 4]);
    let id = store.create(&original).unwrap();
    let key = id.to_string();

    let err = store
        .modify(&key, |r| {
            assert!(r.set_pixel(0, 0, &[9, 9, 9]));
            Err(ChartasError::encoding("refused"))
        })
        .unwrap_err();
    assert!(matches!(err, ChartasError::Encoding(_)));
    assert_eq!(store.read(&key).unwrap(), original);

    store
        .modify(&key, |r| {
            assert!(r.set_pixel(1, 1, &[7, 7, 7]));
            Ok(())
        })
        .unwrap();
    assert_eq!(store.read(&key).unwrap().pixel(1, 1).unwrap(), &[7, 7, 7]);

    std::fs::remove_dir_all(store.root()).ok();
}

#[test]
fn delete_is_idempotent() {
    let store = open_store("store_delete");
    let id = store.create(&Raster::blank(1, 1)).unwrap();
    let key = id.to_string();

    store.delete(&key).unwrap();
    store.delete(&key).unwrap();
    store.delete(&CanvasId::generate().to_string()).unwrap();
    store.delete("not an id").unwrap();

    std::fs::remove_dir_all(store.root()).ok();
}

struct FailingCodec;

impl RasterCodec for FailingCodec {
    fn extension(&self) -> &str {
        "bin"
    }

    fn supports(&self, _layout: PixelLayout) -> bool {
        true
    }

    fn encode(&self, _raster: &Raster) -> ChartasResult<Vec<u8>> {
        Err(ChartasError::encoding("disk format unavailable"))
    }

    fn decode(&self, _bytes: &[u8]) -> ChartasResult<Raster> {
        Err(ChartasError::decode("never written"))
    }
}

#[test]
fn codec_failure_is_reported_not_swallowed() {
    let store = CanvasStore::with_codec(
        StoreConfig {
            extension: "bin".to_string(),
            ..StoreConfig::with_root(temp_dir("store_failing_codec"))
        },
        Box::new(FailingCodec),
    )
    .unwrap();

    assert!(matches!(
        store.create(&Raster::blank(4, 4)),
        Err(ChartasError::Encoding(_))
    ));
    assert!(files_in(store.root()).is_empty());
    std::fs::remove_dir_all(store.root()).ok();
}
