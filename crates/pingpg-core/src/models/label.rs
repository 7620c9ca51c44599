//! 레이블 모델.
//!
//! 시계열 식별/필터링용 name/value 메타데이터 태그.

use serde::{Deserialize, Serialize};

/// 단일 레이블
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label {
    /// 레이블 이름 (예: "client_id", "__name__")
    pub name: String,
    /// 레이블 값
    pub value: String,
}

impl Label {
    /// 새 레이블 생성
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// 순서가 있는 레이블 목록
///
/// 프로토콜상 중복 제거는 필요 없지만 실제로는 이름이 서로 달라야 한다.
/// `Clone`은 항상 깊은 복사이므로 복제본끼리 상태를 공유하지 않는다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelSet(Vec<Label>);

impl LabelSet {
    /// 빈 레이블 목록
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// 용량을 지정해 생성
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// 레이블 추가 (순서 유지)
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push(Label::new(name, value));
    }

    /// 이름으로 첫 번째 값 조회
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|l| l.name == name)
            .map(|l| l.value.as_str())
    }

    /// 이름 목록 (순서 유지)
    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|l| l.name.as_str()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Label> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 이름이 같은 레이블의 값을 바꾼다. 바뀐 레이블이 있으면 true
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.0.iter_mut().find(|l| l.name == name) {
            Some(label) => {
                label.value = value.into();
                true
            }
            None => false,
        }
    }

    /// 다른 레이블 목록을 뒤에 복사해 붙인다
    pub fn extend_from(&mut self, other: &LabelSet) {
        self.0.extend(other.0.iter().cloned());
    }

    pub fn as_slice(&self) -> &[Label] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Label> {
        self.0
    }
}

impl From<Vec<Label>> for LabelSet {
    fn from(labels: Vec<Label>) -> Self {
        Self(labels)
    }
}

impl FromIterator<Label> for LabelSet {
    fn from_iter<I: IntoIterator<Item = Label>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a LabelSet {
    type Item = &'a Label;
    type IntoIter = std::slice::Iter<'a, Label>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
