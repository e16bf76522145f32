//! 라이선스 탐지와 집계
//!
//! - [`expression`]: `SPDX-License-Identifier:` 태그 탐지 및 표현식 분해
//! - [`aggregate`]: 파일 라이선스를 패키지 수준으로 집계 및 정규화

pub mod aggregate;
pub mod expression;

pub use aggregate::{PackageLicenses, get_package_licenses, normalize_expression};
pub use expression::{LICENSE_TAG, get_expression_data, parse_line_for_expression, split_expression};
