pub const BAR_WIDTH: usize = 20;
pub const DESCRIPTION_PREVIEW: usize = 96;

pub const HINT_IDLE: &str = "Ketik `cari <kueri>` untuk menelusuri budaya Nusantara.";
pub const SEARCHING: &str = "Sedang menelusuri korpus...";
pub const NO_RESULTS: &str = "Tidak ada hasil ditemukan.";
pub const OFFLINE_NOTE: &str = "(layanan tidak terjangkau, menampilkan data luring)";
pub const EVALUATION_FAILED: &str = "gagal memuat evaluasi.";
pub const BACK_HINT: &str = "Ketik `kembali` untuk kembali ke hasil pencarian.";

pub const HELP: &str = "\
Perintah:
  cari <kueri>     telusuri korpus
  mode <mode>      semua | tfidf | jaccard
  next / prev      halaman berikutnya / sebelumnya
  buka <n|id>      buka hasil ke-n di halaman ini, atau berdasarkan id
  kembali          kembali dari halaman detail
  eval             tampilkan evaluasi kueri saat ini
  tutup            tutup panel evaluasi
  reset            hapus sesi pencarian
  bantuan          tampilkan bantuan ini
  keluar           keluar";
