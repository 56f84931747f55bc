use tower_http::compression::{
    predicate::{NotForContentType, Predicate, SizeAbove},
    CompressionLayer, CompressionLevel,
};

use crate::server::config::{GZIP_COMPRESS_LEVEL, GZIP_MINIMUM_SIZE};

/// Gzip responses larger than [`GZIP_MINIMUM_SIZE`] bytes for clients accepting it.
///
/// Images, gRPC and event streams are sent as is.
pub fn compression_layer() -> CompressionLayer<impl Predicate> {
    let predicate = SizeAbove::new(GZIP_MINIMUM_SIZE)
        .and(NotForContentType::GRPC)
        .and(NotForContentType::IMAGES)
        .and(NotForContentType::SSE);

    CompressionLayer::new()
        .gzip(true)
        .quality(CompressionLevel::Precise(GZIP_COMPRESS_LEVEL))
        .compress_when(predicate)
}
